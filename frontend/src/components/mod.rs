pub mod collection_editor;
pub mod tab_shell;
