use factoids_core::Factoid;
use factoids_entities::factoids;

pub fn factoid_from_model(m: factoids::Model) -> Factoid {
    Factoid {
        id: m.id,
        scope_id: m.chat_id,
        subject: m.subject,
        verb: m.verb,
        predicate: m.predicate,
        author_id: m.user_id,
        author_name: m.username,
        created_at: m.created_at,
        modified_at: m.modified_at,
        deleted_at: m.deleted_at,
    }
}
