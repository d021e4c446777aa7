pub mod attribute_settings;
pub mod cas_ticket_validator;
pub mod logout_request;
pub mod service_response;

pub use attribute_settings::CasAttributeSettings;
pub use cas_ticket_validator::{CasProtocol, CasTicketValidator};
pub use logout_request::{LogoutRequestError, parse_logout_request};
pub use service_response::{
    ServiceResponse, ServiceResponseError, parse_cas1_response, parse_service_response,
};
