//! Application-wide constants.
//!
//! This module centralizes identity strings and tunable limits so the
//! dashboard can be rebranded or retuned in one place.

use std::time::Duration;

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Global Clock";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "globalclock";

/// The directory name for application data under the platform config dir.
///
/// - Linux: `~/.config/GlobalClock/`
/// - macOS: `~/Library/Application Support/GlobalClock/`
/// - Windows: `%APPDATA%\GlobalClock\`
pub const APP_DATA_DIR: &str = "GlobalClock";

/// Key under which the selected city id list is persisted.
pub const STORAGE_KEY: &str = "global-clock-hubs";

/// Query parameter carrying the shared city id list.
pub const CITIES_PARAM: &str = "cities";

/// Base URL that share links are built on.
pub const SHARE_BASE_URL: &str = "https://globalclock.app/";

/// City id assigned to the synthesized "Current Location" entry.
pub const LOCAL_CITY_ID: &str = "local-node";

/// How long the "Link copied" toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Maximum number of search results shown in the dropdown.
pub const SEARCH_RESULT_CAP: usize = 5;
