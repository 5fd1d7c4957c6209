//! sea-orm entities for the factoid tables.

pub mod factoids;
