#![no_main]

use libfuzzer_sys::fuzz_target;
use mframe_widgets::MicroframeConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = MicroframeConfig::from_toml_str(text) else {
        return;
    };
    // Validation and conversion must agree.
    let errors = config.validate();
    let built = config.to_overlay_config();
    assert_eq!(errors.is_empty(), built.is_ok());
});
