/// Asset-relative directory holding the land manifest
pub const RELATIVE_MANIFEST_PATH: &str = "land_map";

/// File name of the land manifest inside `RELATIVE_MANIFEST_PATH`
pub const MANIFEST_FILE_NAME: &str = "manifest.json";
