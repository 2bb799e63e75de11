use admin_common::model::metrics::MetricsSnapshot;

pub enum Msg {
    Refresh,
    Loaded(MetricsSnapshot),
    ToggleAutoRefresh(bool),
    SetInterval(u32),
}
