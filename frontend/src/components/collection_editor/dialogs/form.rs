//! Create/edit dialog.
//!
//! Inputs are generated from `T::form_fields()`. The dialog is remounted for
//! every record it opens on (`key`), so uncontrolled inputs always start from
//! the record's current values; on a rejected submit they keep what the user
//! typed and show the field errors underneath.

use admin_common::editor::{Entity, FormMode, References};
use admin_common::form::{FieldSpec, InputKind};
use admin_common::shell::Aggregate;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::collection_editor::{CollectionEditorComponent, Msg};
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

pub fn form_dialog<C: Aggregate, T: Entity>(
    component: &CollectionEditorComponent<C, T>,
    link: &Scope<CollectionEditorComponent<C, T>>,
    refs: &References,
) -> Html {
    let editor = &component.editor;
    let (title, form_key) = match editor.form_mode() {
        FormMode::Creating => (format!("Nuevo registro: {}", T::LABEL), "new".to_string()),
        FormMode::Editing(id) => (format!("Editar {}", T::LABEL), id.as_str().to_string()),
        FormMode::Closed => (String::new(), String::new()),
    };
    let values = editor.form_values();
    let errors = editor.errors();
    let fields = T::form_fields();

    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <YwMaterialTopSheet
            open={editor.is_form_open()}
            title={title}
            on_close={link.callback(|_| Msg::CloseForm)}
        >
            <form
                key={form_key}
                ref={component.form_ref.clone()}
                class="editor-form"
                novalidate=true
                {onsubmit}
            >
                {
                    for fields.iter().map(|field| {
                        field_row(
                            field,
                            values.get(field.name).unwrap_or_default(),
                            errors.for_field(field.name),
                            refs,
                        )
                    })
                }
                <footer class="dialog-actions">
                    <button type="button" onclick={link.callback(|_| Msg::CloseForm)}>
                        { "Cancelar" }
                    </button>
                    <button type="submit" class="primary">{ "Guardar" }</button>
                </footer>
            </form>
        </YwMaterialTopSheet>
    }
}

fn field_row(field: &FieldSpec, value: &str, error: Option<&str>, refs: &References) -> Html {
    let input_id = format!("field-{}", field.name);
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };

    if field.input == InputKind::Checkbox {
        return html! {
            <div class={classes!("form-row", "checkbox", error.is_some().then_some("has-error"))}>
                <label for={input_id.clone()}>
                    <input type="checkbox" id={input_id} name={field.name} checked={!value.is_empty()} />
                    { label }
                </label>
                { error_text(error) }
            </div>
        };
    }

    html! {
        <div class={classes!("form-row", error.is_some().then_some("has-error"))}>
            <label for={input_id.clone()}>{ label }</label>
            { field_input(field, &input_id, value, refs) }
            { error_text(error) }
        </div>
    }
}

fn field_input(field: &FieldSpec, input_id: &str, value: &str, refs: &References) -> Html {
    let id = input_id.to_string();
    let name = field.name;
    let value = value.to_string();

    match &field.input {
        InputKind::Text => html! {
            <input type="text" {id} {name} {value} placeholder={field.placeholder} required={field.required} />
        },
        InputKind::TextArea { rows } => html! {
            <textarea {id} {name} {value} rows={rows.to_string()} placeholder={field.placeholder} />
        },
        InputKind::Code { rows } => html! {
            <textarea
                class="code"
                spellcheck="false"
                {id}
                {name}
                {value}
                rows={rows.to_string()}
                placeholder={field.placeholder}
            />
        },
        InputKind::Number { min, max } => html! {
            <input
                type="number"
                {id}
                {name}
                {value}
                min={min.map(|m| m.to_string())}
                max={max.map(|m| m.to_string())}
                required={field.required}
            />
        },
        InputKind::Color => {
            let value = if value.is_empty() { field.placeholder.unwrap_or("#000000") } else { value.as_str() }
                .to_lowercase();
            html! { <input type="color" {id} {name} {value} /> }
        }
        InputKind::DateTime => html! {
            <input type="datetime-local" {id} {name} {value} required={field.required} />
        },
        InputKind::Time => html! {
            <input type="time" {id} {name} {value} required={field.required} />
        },
        InputKind::Select(options) => html! {
            <select {id} {name}>
                {
                    for options.iter().map(|option| html! {
                        <option value={option.value} selected={option.value == value}>
                            { option.label }
                        </option>
                    })
                }
            </select>
        },
        InputKind::Reference { collection, optional } => {
            let options = refs.options(collection);
            let placeholder = if *optional { "— Ninguno —" } else { "Seleccione…" };
            let dangling = !value.is_empty() && !options.iter().any(|o| o.id.as_str() == value);
            html! {
                <select {id} {name}>
                    <option value="" selected={value.is_empty() || dangling}>{ placeholder }</option>
                    {
                        for options.iter().map(|option| html! {
                            <option value={option.id.as_str().to_string()} selected={option.id.as_str() == value}>
                                { option.label.clone() }
                            </option>
                        })
                    }
                </select>
            }
        }
        InputKind::Checkbox => html! {
            <input type="checkbox" {id} {name} checked={!value.is_empty()} />
        },
    }
}

fn error_text(error: Option<&str>) -> Html {
    match error {
        Some(message) => html! { <span class="field-error" role="alert">{ message.to_string() }</span> },
        None => html! {},
    }
}
