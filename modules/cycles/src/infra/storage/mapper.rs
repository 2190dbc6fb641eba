use crate::contract::model::CycleEvent;
use crate::infra::storage::entity::Model;

impl From<Model> for CycleEvent {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            event_type: m.event_type,
            date: m.date,
            meta: m.meta,
        }
    }
}
