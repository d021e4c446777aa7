pub mod use_cases;

pub use use_cases::{
    end_session::{EndSessionError, EndSessionUseCase},
    rebind_menu::{MenuRebinder, PollConfig, PollHandle, PollReport, TickOutcome},
    redirect_logout::LogoutRedirector,
    resolve_session::{ResolutionOutcome, SessionResolution, SessionResolver},
};
