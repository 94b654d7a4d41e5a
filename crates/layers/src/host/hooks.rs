//! Names of host execution points layers defer to or register against.

pub const MUPLUGINS_LOADED: &str = "muplugins_loaded";
pub const SETUP_THEME: &str = "setup_theme";
pub const INIT: &str = "init";
pub const ADMIN_INIT: &str = "admin_init";

/// Host lifecycle points in the order the host reaches them.
pub const LIFECYCLE: [&str; 3] = [MUPLUGINS_LOADED, SETUP_THEME, INIT];

pub const WP_HEAD: &str = "wp_head";
pub const WP_BODY_OPEN: &str = "wp_body_open";
pub const ADMIN_NOTICES: &str = "admin_notices";
pub const ADMIN_MENU: &str = "admin_menu";
pub const ADMIN_BAR_MENU: &str = "admin_bar_menu";
pub const ADMIN_FOOTER_TEXT: &str = "admin_footer_text";
pub const UPDATE_FOOTER: &str = "update_footer";
pub const BEFORE_ADMIN_BAR_RENDER: &str = "wp_before_admin_bar_render";
pub const REST_API_INIT: &str = "rest_api_init";

pub const WP_MAIL_FROM: &str = "wp_mail_from";
pub const WP_MAIL_FROM_NAME: &str = "wp_mail_from_name";
pub const WP_MAIL_FAILED: &str = "wp_mail_failed";
pub const PHPMAILER_INIT: &str = "phpmailer_init";

pub const THE_GENERATOR: &str = "the_generator";
pub const XMLRPC_ENABLED: &str = "xmlrpc_enabled";

pub const COMMENTS_OPEN: &str = "comments_open";
pub const PINGS_OPEN: &str = "pings_open";
pub const COMMENTS_ARRAY: &str = "comments_array";

pub const RESOURCE_HINTS: &str = "wp_resource_hints";
pub const TINY_MCE_PLUGINS: &str = "tiny_mce_plugins";
pub const EMBED_OEMBED_DISCOVER: &str = "embed_oembed_discover";

pub const OPTION_HOME: &str = "option_home";
pub const OPTION_SITEURL: &str = "option_siteurl";
pub const NETWORK_SITE_URL: &str = "network_site_url";
pub const STYLE_LOADER_SRC: &str = "style_loader_src";
pub const SCRIPT_LOADER_SRC: &str = "script_loader_src";

pub const ADMIN_PRINT_SCRIPTS: &str = "admin_print_scripts";
pub const ADMIN_PRINT_STYLES: &str = "admin_print_styles";
pub const WP_PRINT_STYLES: &str = "wp_print_styles";
pub const COMMENT_TEXT_RSS: &str = "comment_text_rss";
pub const THE_CONTENT_FEED: &str = "the_content_feed";
pub const WP_MAIL: &str = "wp_mail";
