//! Record browser core: session state machine and selection tracking

pub mod selection;
pub mod session;

pub use selection::SelectionSet;
pub use session::{
    Applied, BrowserSession, PageState, PageTicket, SearchTicket, FETCH_ERROR_MESSAGE,
};
