//! Constants for default styles and anchoring

/// Font family shared by every preset style
pub const DEFAULT_FONT_NAME: &str = "Calibri";

/// Font size used by presets that do not set their own
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Title font size
pub const TITLE_FONT_SIZE: f64 = 24.0;

/// Body font size
pub const BODY_FONT_SIZE: f64 = 12.0;

/// Default font color (black)
pub const DEFAULT_FONT_COLOR: u32 = 0x000000;

/// Header background fill (light gray)
pub const HEADER_FILL_COLOR: u32 = 0xD9D9D9;

/// Reference used when a cell is anchored by neither position nor label
pub const DEFAULT_ANCHOR_LABEL: &str = "B2";

/// Display token for `true`
pub const TRUE_TOKEN: &str = "YES";

/// Display token for `false`
pub const FALSE_TOKEN: &str = "NO";

/// Highest zero-based column index an xlsx worksheet accepts
pub const MAX_COLUMN_INDEX: u32 = 16_383;

/// Highest zero-based row index an xlsx worksheet accepts
pub const MAX_ROW_INDEX: u32 = 1_048_575;
