pub mod task;
pub mod text_field;

pub use task::{ControlSlot, TaskId, TaskKind, TaskSeq, TaskState};
pub use text_field::TextField;
