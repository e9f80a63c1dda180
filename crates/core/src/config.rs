//! Configuration constants for EasyType font builds.

pub use font_subsetter::DEFAULT_UNICODE_RANGE;

/// Directory the hinted Noto Sans TTFs are fetched from.
pub const BASE_URL: &str = "https://github.com/notofonts/noto-fonts/raw/main/hinted/ttf/NotoSans/";

/// Default cache directory for downloaded base fonts.
pub const BASE_DIR: &str = "base_fonts";

/// Default output directory for TTFs.
pub const TTF_DIR: &str = "fonts/ttf";

/// Default output directory for WOFF2 files.
pub const WEB_DIR: &str = "fonts/web";

/// Version shown to people.
pub const VERSION_DISPLAY: &str = "1.0.2";

/// Version written to the name and head tables.
pub const VERSION_DECIMAL: &str = "1.002";

/// Vendor part of the unique font identifier (name ID 3).
pub const VENDOR: &str = "EASYTYPE";

/// Suffix of the intermediate file written before hinting.
pub const PRE_HINT_SUFFIX: &str = "-tmp";
