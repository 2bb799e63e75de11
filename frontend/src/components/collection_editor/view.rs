//! View rendering for the collection editor component.
//!
//! Layout: a toolbar (search, status filter, counter, create button), the record
//! table with sortable headers, and two dialogs (create/edit form and delete
//! confirmation) that stay mounted and open from editor state.

use admin_common::editor::{Entity, References, StatusFilter, UPDATED_AT_COLUMN};
use admin_common::form::ColumnSpec;
use admin_common::shell::Aggregate;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::dialogs::confirm::confirm_dialog;
use super::dialogs::form::form_dialog;
use super::helpers::sort_indicator;
use super::messages::Msg;
use super::state::CollectionEditorComponent;

pub fn view<C: Aggregate, T: Entity>(
    component: &CollectionEditorComponent<C, T>,
    ctx: &Context<CollectionEditorComponent<C, T>>,
) -> Html {
    let link = ctx.link();
    let refs = ctx.props().config.references();
    let rows = component.editor.list();

    html! {
        <section class="collection-editor">
            { build_toolbar(component, link, rows.len()) }
            { build_table(component, link, &rows, &refs) }
            { form_dialog(component, link, &refs) }
            { confirm_dialog(component, link) }
        </section>
    }
}

fn build_toolbar<C: Aggregate, T: Entity>(
    component: &CollectionEditorComponent<C, T>,
    link: &Scope<CollectionEditorComponent<C, T>>,
    shown: usize,
) -> Html {
    let query = &component.editor.query;
    let total = component.editor.collection().len();
    let status = query.status;

    html! {
        <div class="editor-toolbar">
            <input
                type="search"
                class="editor-search"
                placeholder="Buscar…"
                value={query.needle.clone()}
                oninput={link.callback(|e: InputEvent| {
                    Msg::Search(e.target_unchecked_into::<HtmlInputElement>().value())
                })}
            />
            <select
                class="editor-status-filter"
                onchange={link.callback(|e: Event| {
                    let key = e.target_unchecked_into::<HtmlSelectElement>().value();
                    Msg::FilterStatus(StatusFilter::from_key(&key))
                })}
            >
                { status_option(StatusFilter::All, "Todos", status) }
                { status_option(StatusFilter::Active, "Activos", status) }
                { status_option(StatusFilter::Inactive, "Inactivos", status) }
            </select>
            <span class="editor-count">{ format!("{shown} de {total}") }</span>
            <button type="button" class="primary" onclick={link.callback(|_| Msg::OpenCreate)}>
                { format!("Añadir {}", T::LABEL) }
            </button>
        </div>
    }
}

fn status_option(filter: StatusFilter, label: &'static str, current: StatusFilter) -> Html {
    html! {
        <option value={filter.key()} selected={filter == current}>{ label }</option>
    }
}

fn build_table<C: Aggregate, T: Entity>(
    component: &CollectionEditorComponent<C, T>,
    link: &Scope<CollectionEditorComponent<C, T>>,
    rows: &[&T],
    refs: &References,
) -> Html {
    if component.editor.collection().is_empty() {
        return html! {
            <div class="editor-empty">
                <p>{ "Todavía no hay registros." }</p>
                <button type="button" onclick={link.callback(|_| Msg::OpenCreate)}>
                    { format!("Crear el primer registro: {}", T::LABEL) }
                </button>
            </div>
        };
    }
    if rows.is_empty() {
        return html! {
            <div class="editor-empty">{ "Ningún registro coincide con la búsqueda o el filtro." }</div>
        };
    }

    let columns = T::columns();
    html! {
        <table class="editor-table">
            <thead>
                <tr>
                    { for columns.iter().map(|column| header_cell(component, link, column)) }
                    <th>{ "Estado" }</th>
                    { header_cell(component, link, &UPDATED_AT_COLUMN) }
                    <th class="actions">{ "Acciones" }</th>
                </tr>
            </thead>
            <tbody>
                { for rows.iter().map(|record| build_row(link, &columns, *record, refs)) }
            </tbody>
        </table>
    }
}

fn header_cell<C: Aggregate, T: Entity>(
    component: &CollectionEditorComponent<C, T>,
    link: &Scope<CollectionEditorComponent<C, T>>,
    column: &ColumnSpec,
) -> Html {
    if !column.sortable {
        return html! { <th>{ column.header }</th> };
    }
    let key = column.key;
    let direction = component.editor.query.direction_of(key);
    html! {
        <th class={classes!("sortable", direction.is_some().then_some("sorted"))}>
            <button type="button" onclick={link.callback(move |_| Msg::SortBy(key))}>
                { column.header }
                <span class="sort-indicator">{ sort_indicator(direction) }</span>
            </button>
        </th>
    }
}

fn build_row<C: Aggregate, T: Entity>(
    link: &Scope<CollectionEditorComponent<C, T>>,
    columns: &[ColumnSpec],
    record: &T,
    refs: &References,
) -> Html {
    let id = record.id().clone();
    let toggle_id = id.clone();
    let edit_id = id.clone();
    let remove_id = id.clone();

    html! {
        <tr key={id.as_str().to_string()} class={classes!((!record.is_active()).then_some("inactive"))}>
            { for columns.iter().map(|column| html! { <td>{ record.cell(column.key, refs) }</td> }) }
            <td>
                <button
                    type="button"
                    class={classes!("status-badge", if record.is_active() { "active" } else { "inactive" })}
                    title="Cambiar estado"
                    onclick={link.callback(move |_| Msg::ToggleActive(toggle_id.clone()))}
                >
                    { record.status_label() }
                </button>
            </td>
            <td>{ record.meta().updated_at.format("%Y-%m-%d %H:%M").to_string() }</td>
            <td class="actions">
                <button type="button" onclick={link.callback(move |_| Msg::OpenEdit(edit_id.clone()))}>
                    { "Editar" }
                </button>
                <button
                    type="button"
                    class="danger"
                    onclick={link.callback(move |_| Msg::RequestRemove(remove_id.clone()))}
                >
                    { "Eliminar" }
                </button>
            </td>
        </tr>
    }
}
