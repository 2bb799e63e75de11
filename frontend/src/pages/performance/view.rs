//! View rendering for the performance page: controls, origin banner, summary
//! tiles and the per-table breakdown.

use admin_common::config::REFRESH_CHOICES;
use admin_common::model::metrics::{DataOrigin, MetricsSnapshot, TableMetric};
use num_format::{Locale, ToFormattedString};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::PerformancePage;
use crate::workspace_grid::WorkspaceGrid;

pub fn view(page: &PerformancePage, ctx: &Context<PerformancePage>) -> Html {
    let link = ctx.link();

    html! {
        <div class="performance-page">
            <h1>{ "Rendimiento" }</h1>
            { build_controls(page, link) }
            {
                match &page.snapshot {
                    Some(snapshot) => html! {
                        <>
                            { origin_banner(snapshot) }
                            { summary(snapshot) }
                            { table_breakdown(&snapshot.tables) }
                        </>
                    },
                    None => html! { <div class="loading" aria-busy="true">{ "Cargando métricas…" }</div> },
                }
            }
        </div>
    }
}

fn build_controls(page: &PerformancePage, link: &Scope<PerformancePage>) -> Html {
    let policy = page.console.refresh;

    html! {
        <div class="performance-controls">
            <button
                type="button"
                disabled={page.loading}
                onclick={link.callback(|_| Msg::Refresh)}
            >
                { if page.loading { "Actualizando…" } else { "Actualizar" } }
            </button>
            <label>
                <input
                    type="checkbox"
                    checked={policy.enabled}
                    onchange={link.callback(|e: Event| {
                        Msg::ToggleAutoRefresh(e.target_unchecked_into::<HtmlInputElement>().checked())
                    })}
                />
                { "Actualización automática" }
            </label>
            <select
                disabled={!policy.enabled}
                onchange={link.callback(|e: Event| {
                    let raw = e.target_unchecked_into::<HtmlSelectElement>().value();
                    // Options only carry REFRESH_CHOICES; 0 is rejected by the policy.
                    Msg::SetInterval(raw.parse().unwrap_or_default())
                })}
            >
                {
                    for REFRESH_CHOICES.iter().map(|secs| html! {
                        <option value={secs.to_string()} selected={*secs == policy.interval_secs}>
                            { format!("cada {secs} s") }
                        </option>
                    })
                }
            </select>
        </div>
    }
}

fn origin_banner(snapshot: &MetricsSnapshot) -> Html {
    match snapshot.origin {
        DataOrigin::Live => {
            let failed: Vec<&str> = snapshot.failed_tables().collect();
            html! {
                <div class="banner live" role="status">
                    { format!("Datos en vivo · {}", snapshot.collected_at.format("%H:%M:%S")) }
                    {
                        if failed.is_empty() {
                            html! {}
                        } else {
                            html! { <span class="banner-detail">{ format!(" · Sin respuesta: {}", failed.join(", ")) }</span> }
                        }
                    }
                </div>
            }
        }
        DataOrigin::Simulated => html! {
            <div class="banner simulated" role="status">
                { "Datos simulados: el servidor no respondió a ninguna consulta." }
            </div>
        },
    }
}

fn summary(snapshot: &MetricsSnapshot) -> Html {
    html! {
        <WorkspaceGrid columns={4} class="stat-grid">
            { tile("Registros totales", snapshot.total_rows.to_formatted_string(&Locale::es)) }
            { tile("Tamaño estimado", format_bytes(snapshot.total_bytes)) }
            { tile("Índices estimados", format_bytes(snapshot.total_index_bytes())) }
            { tile("Aciertos de caché", format!("{:.1} %", snapshot.cache_hit_ratio * 100.0)) }
        </WorkspaceGrid>
    }
}

fn tile(label: &'static str, value: String) -> Html {
    html! {
        <div class="stat-card">
            <span class="stat-label">{ label }</span>
            <strong class="stat-value">{ value }</strong>
        </div>
    }
}

fn table_breakdown(tables: &[TableMetric]) -> Html {
    html! {
        <table class="metrics-table">
            <thead>
                <tr>
                    <th>{ "Tabla" }</th>
                    <th>{ "Registros" }</th>
                    <th>{ "Tamaño" }</th>
                    <th>{ "Índices" }</th>
                    <th>{ "Estado" }</th>
                </tr>
            </thead>
            <tbody>
                {
                    for tables.iter().map(|metric| html! {
                        <tr key={metric.table.clone()} class={classes!(metric.failed.then_some("failed"))}>
                            <td>{ metric.table.clone() }</td>
                            <td>{ metric.rows.to_formatted_string(&Locale::es) }</td>
                            <td>{ format_bytes(metric.estimated_bytes) }</td>
                            <td>{ format_bytes(metric.index_bytes) }</td>
                            <td>{ if metric.failed { "Sin respuesta" } else { "OK" } }</td>
                        </tr>
                    })
                }
            </tbody>
        </table>
    }
}

/// Binary-prefixed size with one decimal above a kibibyte.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::format_bytes;

    #[test]
    fn sizes_pick_the_largest_fitting_unit() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
    }
}
