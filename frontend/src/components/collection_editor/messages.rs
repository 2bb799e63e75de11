use admin_common::editor::StatusFilter;
use admin_common::model::record::RecordId;

pub enum Msg {
    OpenCreate,
    OpenEdit(RecordId),
    CloseForm,
    /// Read the open form from the DOM and create or update.
    Submit,
    ToggleActive(RecordId),
    RequestRemove(RecordId),
    ConfirmRemove,
    CancelRemove,
    Search(String),
    SortBy(&'static str),
    FilterStatus(StatusFilter),
}
