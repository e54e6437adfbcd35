//! Message selection for the codes page.
//!
//! `ListingService` walks the message source newest-first and picks either
//! the most recent verification code messages or every message.

use std::ops::ControlFlow;

use smscode_types::error::StorageError;
use smscode_types::message::Message;

use crate::matcher::CodeMatcher;
use crate::repository::message::MessageSource;

/// Upper bound on rows read from the store per traversal.
pub const STORE_SCAN_LIMIT: u32 = 10_000;

/// Maximum messages shown in the default (codes only) listing.
pub const MAX_CODE_MESSAGES: usize = 10;

/// Which messages a request wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingMode {
    /// Up to [`MAX_CODE_MESSAGES`] messages that look like verification codes.
    #[default]
    Codes,
    /// Every message up to [`STORE_SCAN_LIMIT`], unfiltered.
    All,
}

impl ListingMode {
    /// Interpret the `all` query flag. `1`, `true`, `yes` and `on` are truthy.
    pub fn from_all_flag(flag: Option<&str>) -> Self {
        match flag.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => ListingMode::All,
            _ => ListingMode::Codes,
        }
    }
}

/// Selects messages from a [`MessageSource`].
pub struct ListingService<S> {
    source: S,
    matcher: &'static CodeMatcher,
}

impl<S: MessageSource> ListingService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            matcher: CodeMatcher::shared(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Collect messages for `mode`, preserving store order.
    ///
    /// In [`ListingMode::Codes`] the traversal stops as soon as
    /// [`MAX_CODE_MESSAGES`] matches have been collected.
    pub async fn collect(&self, mode: ListingMode) -> Result<Vec<Message>, StorageError> {
        let mut collected = Vec::new();
        let matcher = self.matcher;

        match mode {
            ListingMode::All => {
                self.source
                    .for_each_recent_message(STORE_SCAN_LIMIT, |msg| {
                        collected.push(msg);
                        ControlFlow::Continue(())
                    })
                    .await?;
            }
            ListingMode::Codes => {
                self.source
                    .for_each_recent_message(STORE_SCAN_LIMIT, |msg| {
                        if matcher.is_verification_code(&msg.text) {
                            collected.push(msg);
                        }
                        if collected.len() >= MAX_CODE_MESSAGES {
                            ControlFlow::Break(())
                        } else {
                            ControlFlow::Continue(())
                        }
                    })
                    .await?;
            }
        }

        Ok(collected)
    }

    /// Read the full scan bound once.
    ///
    /// Used at startup to prove the store is readable. With `report_codes`,
    /// every message classified as a code is logged and counted.
    pub async fn preload(&self, report_codes: bool) -> Result<PreloadReport, StorageError> {
        let mut report = PreloadReport::default();
        let matcher = self.matcher;

        self.source
            .for_each_recent_message(STORE_SCAN_LIMIT, |msg| {
                report.scanned += 1;
                if report_codes {
                    if let Some(rule) = matcher.matching_rule(&msg.text) {
                        tracing::info!(rule, "{msg}");
                        report.reported += 1;
                    }
                }
                ControlFlow::Continue(())
            })
            .await?;

        Ok(report)
    }
}

/// Outcome of [`ListingService::preload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreloadReport {
    /// Rows read from the store.
    pub scanned: usize,
    /// Code messages logged (always zero without `report_codes`).
    pub reported: usize,
}
