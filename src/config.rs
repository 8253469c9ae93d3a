/// Configuration for an explorer session
#[derive(Clone)]
pub struct ExplorerConfig {
    /// Render a single biomorph to stdout instead of running the
    /// interactive session
    pub print: bool,
    pub seed: Option<u64>,
    /// Color scheme index (0 = mono, uses the renderer's own grey)
    pub scheme: u8,
    /// Fixed glyph for segments; None picks a glyph per segment slope
    pub line_char: Option<char>,
}
