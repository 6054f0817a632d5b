mod dispatcher;
mod hook;
pub mod reference;

pub use dispatcher::{HookDispatcher, RecordEvent, RecordSlot};
pub use hook::{
    ColumnEntry, FieldHook, FieldHookFn, PatchEntry, RecordHook, RecordHookFn, field_hook_fn,
    record_hook_fn,
};
