//! The application's forms.

mod add_vehicle;
mod book;
mod fields;
mod search;

pub use add_vehicle::AddVehicleForm;
pub use book::BookVehicleForm;
pub use fields::{PINCODE_PATTERN, SAME_PINCODE_MESSAGE, parse_start_time};
pub use search::SearchAvailabilityForm;

/// Field names shared by the forms, as sent to and reported by the API.
pub mod field {
    pub const NAME: &str = "name";
    pub const CAPACITY_KG: &str = "capacityKg";
    pub const TYRES: &str = "tyres";
    pub const CAPACITY_REQUIRED: &str = "capacityRequired";
    pub const FROM_PINCODE: &str = "fromPincode";
    pub const TO_PINCODE: &str = "toPincode";
    pub const START_TIME: &str = "startTime";
    pub const VEHICLE_ID: &str = "vehicleId";
    pub const CUSTOMER_ID: &str = "customerId";
}
