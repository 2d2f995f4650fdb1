// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for host option parsing.
//!
//! Arbitrary bytes as options JSON must produce a config or an
//! `InvalidConfiguration` error. Never a panic, never another error kind.

#![no_main]

use libfuzzer_sys::fuzz_target;
use mixup::{rescore, RescoreConfig, RescoreError, RescoreOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    let config = RescoreOptions::from_json(json).and_then(RescoreConfig::try_from);
    match config {
        Ok(config) => {
            let hits = mixup::testing::example_window();
            // Decline params can still be rejected for this window's depth
            if let Err(e) = rescore(&hits, &config) {
                assert!(matches!(e, RescoreError::InvalidConfiguration { .. }));
            }
        }
        Err(e) => assert!(matches!(e, RescoreError::InvalidConfiguration { .. })),
    }
});
