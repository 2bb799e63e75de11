use admin_common::editor::Entity;
use admin_common::shell::Aggregate;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::collection_editor::{CollectionEditorComponent, Msg};
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

/// Second step of every delete. Open while the editor holds a pending deletion.
pub fn confirm_dialog<C: Aggregate, T: Entity>(
    component: &CollectionEditorComponent<C, T>,
    link: &Scope<CollectionEditorComponent<C, T>>,
) -> Html {
    let pending = component.editor.pending_delete();
    let name = pending
        .map(|record| record.display_name().to_string())
        .unwrap_or_default();

    html! {
        <YwMaterialTopSheet
            open={pending.is_some()}
            title={format!("Eliminar {}", T::LABEL)}
            on_close={link.callback(|_| Msg::CancelRemove)}
        >
            <p class="confirm-message">
                { format!("¿Eliminar «{name}»? Esta acción no se puede deshacer.") }
            </p>
            <footer class="dialog-actions">
                <button type="button" onclick={link.callback(|_| Msg::CancelRemove)}>
                    { "Cancelar" }
                </button>
                <button type="button" class="danger" onclick={link.callback(|_| Msg::ConfirmRemove)}>
                    { "Eliminar" }
                </button>
            </footer>
        </YwMaterialTopSheet>
    }
}
