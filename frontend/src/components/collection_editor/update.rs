//! Update function for the collection editor component.
//!
//! Elm-style: mutates the component for one `Msg` and returns whether the view
//! should re-render. Every successful mutation is published upward immediately;
//! rejected input leaves the collection alone and keeps the form open with its
//! field errors.

use admin_common::editor::{EditorError, Entity, FormMode};
use admin_common::shell::Aggregate;
use yew::prelude::*;

use super::helpers::{read_form, show_toast};
use super::messages::Msg;
use super::state::CollectionEditorComponent;

pub fn update<C: Aggregate, T: Entity>(
    component: &mut CollectionEditorComponent<C, T>,
    ctx: &Context<CollectionEditorComponent<C, T>>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::OpenCreate => {
            component.editor.open_create();
            true
        }
        Msg::OpenEdit(id) => component.editor.open_edit(&id),
        Msg::CloseForm => {
            component.editor.close_form();
            true
        }
        Msg::Submit => {
            let Some(form) = read_form::<T>(&component.form_ref) else {
                gloo_console::error!("formulario no disponible");
                return false;
            };
            let creating = matches!(component.editor.form_mode(), FormMode::Creating);

            match component.editor.submit(&form) {
                Ok(_) => {
                    publish(component, ctx);
                    show_toast(if creating {
                        "Registro creado."
                    } else {
                        "Cambios guardados."
                    });
                }
                Err(EditorError::Invalid(errors)) => {
                    gloo_console::warn!(format!("{} rechazado: {}", T::LABEL, errors));
                    show_toast("Revise los campos marcados.");
                }
                Err(err) => {
                    gloo_console::error!(err.to_string());
                    show_toast("No se pudo guardar el registro.");
                }
            }
            true
        }
        Msg::ToggleActive(id) => {
            if component.editor.toggle_active(&id) {
                publish(component, ctx);
                true
            } else {
                show_toast("El estado de este registro ya no puede cambiar.");
                false
            }
        }
        Msg::RequestRemove(id) => component.editor.request_remove(&id),
        Msg::ConfirmRemove => {
            let name = component
                .editor
                .pending_delete()
                .map(|record| record.display_name().to_string());
            if component.editor.confirm_remove() {
                publish(component, ctx);
                show_toast(&format!("«{}» eliminado.", name.unwrap_or_default()));
            }
            true
        }
        Msg::CancelRemove => {
            component.editor.cancel_remove();
            true
        }
        Msg::Search(needle) => {
            component.editor.query.needle = needle;
            true
        }
        Msg::SortBy(key) => {
            component.editor.query.sort_by(key);
            true
        }
        Msg::FilterStatus(status) => {
            component.editor.query.status = status;
            true
        }
    }
}

/// Hands the whole next aggregate to the owner.
fn publish<C: Aggregate, T: Entity>(
    component: &CollectionEditorComponent<C, T>,
    ctx: &Context<CollectionEditorComponent<C, T>>,
) {
    let props = ctx.props();
    props
        .on_change
        .emit(component.editor.publish(&props.lens, &props.config));
}
