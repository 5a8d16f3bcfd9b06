//! Default TOML config template with inline documentation comments.

pub(crate) fn default_config_toml() -> &'static str {
    r#"# memslot configuration
# Written on first run; edit freely.
# Only override what you want to change -- missing fields use defaults.

[bridge]
# offline = false            # run against the built-in stand-in instead of the host

[host]
# slot_count = 10            # 1-64
# external_url = "https://github.com/memslot/memslot"
# data_file = "/path/to/slots.json"
# status_interval_ms = 500   # 10-60000

[logging]
# level = "memslot=info"
"#
}
