pub enum Msg<C> {
    /// Mount-time population finished.
    Loaded(C),
    SelectTab(&'static str),
    /// An editor published the next aggregate.
    ConfigurationChanged(C),
}
