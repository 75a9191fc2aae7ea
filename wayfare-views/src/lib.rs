pub mod navigation;
pub mod error;
pub mod session;
pub mod booking_form;
pub mod favorites;
pub mod collection;
pub mod browser;
pub mod hotel_detail;
pub mod local_hotel;
pub mod profile;
pub mod flights;

#[cfg(test)]
pub(crate) mod mocks;

pub use navigation::{Navigator, Route, RouteState};
pub use error::{ViewError, ViewResult};
pub use session::{LoginView, RegisterView};
pub use booking_form::BookingForm;
pub use favorites::{FavoriteToggle, ToggleOutcome};
pub use collection::FavoritesView;
pub use browser::HotelBrowser;
pub use hotel_detail::ExternalHotelView;
pub use local_hotel::LocalHotelView;
pub use profile::ProfileView;
pub use flights::FlightsView;
