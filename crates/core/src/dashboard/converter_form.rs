use std::sync::{Mutex, MutexGuard};

use crate::errors::CoreError;
use crate::models::conversion::Conversion;
use crate::models::currency::Currency;
use crate::services::converter_service::ConverterService;
use crate::views::converter::ConversionView;
use super::pending::Pending;

#[derive(Debug)]
struct FormState {
    amount: String,
    from: Currency,
    to: Currency,
    result: Option<Conversion>,
    error: Option<String>,
    issued_seq: u64,
    settled_seq: u64,
    applied_seq: u64,
}

impl FormState {
    fn abandon(&mut self, seq: u64) {
        self.settled_seq = self.settled_seq.max(seq);
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            amount: "1".into(),
            from: Currency::Usd,
            to: Currency::Btc,
            result: None,
            error: None,
            issued_seq: 0,
            settled_seq: 0,
            applied_seq: 0,
        }
    }
}

/// Converter form state: amount text plus the from/to pair.
///
/// Every edit recomputes the conversion. Results are sequence-tagged so a
/// slow rate lookup for an earlier keystroke cannot overwrite the answer
/// for a later one.
pub struct ConverterForm {
    state: Mutex<FormState>,
    service: ConverterService,
}

impl ConverterForm {
    /// Starts at `1 USD → BTC`.
    pub fn new(service: ConverterService) -> Self {
        Self {
            state: Mutex::new(FormState::default()),
            service,
        }
    }

    pub async fn set_amount(&self, text: impl Into<String>) -> bool {
        self.lock().amount = text.into();
        self.recompute().await
    }

    pub async fn set_from(&self, currency: Currency) -> bool {
        self.lock().from = currency;
        self.recompute().await
    }

    pub async fn set_to(&self, currency: Currency) -> bool {
        self.lock().to = currency;
        self.recompute().await
    }

    /// Exchange the from/to currencies and recompute.
    pub async fn swap(&self) -> bool {
        {
            let mut state = self.lock();
            let FormState { from, to, .. } = &mut *state;
            std::mem::swap(from, to);
        }
        self.recompute().await
    }

    /// Run the conversion for the current inputs. Returns `true` if the
    /// outcome was applied (i.e. no newer edit finished first).
    pub async fn recompute(&self) -> bool {
        let (seq, amount_text, from, to) = {
            let mut state = self.lock();
            state.issued_seq += 1;
            (state.issued_seq, state.amount.clone(), state.from, state.to)
        };

        let pending = Pending::new(&self.state, seq, FormState::abandon);
        let result = match parse_amount(&amount_text) {
            Ok(amount) => self.service.convert(amount, from, to).await,
            Err(e) => Err(e),
        };
        pending.complete();

        let mut state = self.lock();
        state.settled_seq = state.settled_seq.max(seq);
        if seq <= state.applied_seq {
            return false;
        }
        state.applied_seq = seq;

        match result {
            Ok(conversion) => {
                state.result = Some(conversion);
                state.error = None;
            }
            Err(e) => {
                tracing::debug!(error = %e, "conversion failed");
                // Invalid input keeps the last good result visible.
                if !matches!(e, CoreError::InvalidAmount) {
                    state.result = None;
                }
                state.error = Some(e.to_string());
            }
        }
        true
    }

    pub fn amount(&self) -> String {
        self.lock().amount.clone()
    }

    pub fn pair(&self) -> (Currency, Currency) {
        let state = self.lock();
        (state.from, state.to)
    }

    pub fn result(&self) -> Option<Conversion> {
        self.lock().result.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        let state = self.lock();
        state.issued_seq > state.settled_seq
    }

    pub fn view(&self) -> Option<ConversionView> {
        self.lock().result.as_ref().map(ConversionView::from_conversion)
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Parse the amount field. Empty, non-numeric and non-positive input are
/// all rejected with the same user-facing message.
pub fn parse_amount(text: &str) -> Result<f64, CoreError> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(CoreError::InvalidAmount),
    }
}
