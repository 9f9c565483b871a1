//! Overview/detail navigation state for one session.

use serde::Serialize;

use crate::core::{DashError, Symbol};

/// Which screen is showing. `Detail` always carries the selected symbol.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum ViewState {
    #[default]
    Overview,
    Detail { symbol: Symbol },
}

impl ViewState {
    #[must_use]
    pub const fn is_overview(&self) -> bool {
        matches!(self, Self::Overview)
    }

    /// The symbol shown on the detail screen, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&Symbol> {
        match self {
            Self::Overview => None,
            Self::Detail { symbol } => Some(symbol),
        }
    }

    /// Overview -> Detail(symbol), for free-text symbol entry.
    ///
    /// # Errors
    ///
    /// [`DashError::InvalidInput`] when the symbol does not parse or the detail
    /// screen is already open; the state is left unchanged.
    pub fn select_for_detail(&mut self, symbol: &str) -> Result<&Symbol, DashError> {
        self.ensure_overview()?;
        let symbol = Symbol::parse(symbol)?;
        *self = Self::Detail { symbol };
        self.selected()
            .ok_or_else(|| DashError::InvalidInput("no symbol selected".into()))
    }

    /// Overview -> Detail(symbol), where `symbol` must be one of the rows on screen.
    ///
    /// # Errors
    ///
    /// [`DashError::InvalidInput`] when the symbol does not parse, is not displayed,
    /// or the detail screen is already open; the state is left unchanged.
    pub fn select_listed<'a, I>(&mut self, symbol: &str, displayed: I) -> Result<&Symbol, DashError>
    where
        I: IntoIterator<Item = &'a Symbol>,
    {
        self.ensure_overview()?;
        let symbol = Symbol::parse(symbol)?;
        if !displayed.into_iter().any(|s| *s == symbol) {
            return Err(DashError::InvalidInput(format!(
                "{symbol} is not in the displayed list"
            )));
        }
        self.select_for_detail(symbol.as_str())
    }

    /// Detail(*) -> Overview. A no-op on the overview screen.
    pub fn close_detail(&mut self) {
        *self = Self::Overview;
    }

    fn ensure_overview(&self) -> Result<(), DashError> {
        match self {
            Self::Overview => Ok(()),
            Self::Detail { symbol } => Err(DashError::InvalidInput(format!(
                "detail view for {symbol} is already open"
            ))),
        }
    }
}
