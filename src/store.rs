// In-memory cache of the collections fetched from the booking service.
// Saves merge back by identifier and deletes remove by identifier, so a
// stale index can never clobber an unrelated record.

use crate::models::{Booking, Vehicle};

#[derive(Debug, Default)]
pub struct Store {
    pub vehicles: Vec<Vehicle>,
    pub bookings: Vec<Booking>,
}

impl Store {
    pub fn new(vehicles: Vec<Vehicle>, bookings: Vec<Booking>) -> Self {
        Self { vehicles, bookings }
    }

    pub fn vehicle(&self, vehicle_id: u32) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.vehicle_id == vehicle_id)
    }

    pub fn booking(&self, booking_id: u32) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.booking_id == booking_id)
    }

    // Substitute the canonical stored record returned by the service for our
    // cached copy. Returns false if the id is unknown (e.g. deleted by
    // another client since our last fetch).
    pub fn replace_booking(&mut self, saved: Booking) -> bool {
        match self
            .bookings
            .iter_mut()
            .find(|b| b.booking_id == saved.booking_id)
        {
            Some(slot) => {
                *slot = saved;
                true
            }
            None => false,
        }
    }

    pub fn remove_booking(&mut self, booking_id: u32) -> bool {
        let before = self.bookings.len();
        self.bookings.retain(|b| b.booking_id != booking_id);
        self.bookings.len() != before
    }
}
