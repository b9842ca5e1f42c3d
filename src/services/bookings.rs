use crate::models::booking::{Booking, BookingList, BookingQuery, TimeFilter};
use crate::services::backend::BackendClient;
use crate::services::notifications::NotificationCenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingSort {
    StartDate,
    TotalPrice,
}

/// Read-only booking inspection for the dashboard.
#[derive(Clone)]
pub struct BookingService {
    backend: BackendClient,
    notifications: NotificationCenter,
}

impl BookingService {
    pub fn new(backend: BackendClient, notifications: NotificationCenter) -> Self {
        Self {
            backend,
            notifications,
        }
    }

    pub async fn list(
        &self,
        filter: TimeFilter,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let result = match self
            .backend
            .post("/admin/bookings")
            .json(&BookingQuery { filter })
            .send()
            .await
        {
            Ok(response) => self.backend.read_json::<BookingList>(response).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(listing) => {
                tracing::info!("Fetched {} bookings for filter {}", listing.bookings.len(), filter);
                Ok(listing.bookings)
            }
            Err(e) => {
                self.notifications
                    .error(format!("Failed to load bookings: {}", e));
                Err(e)
            }
        }
    }
}

/// Client-side ordering for the dashboard table.
pub fn sort_bookings(bookings: &mut [Booking], by: BookingSort, ascending: bool) {
    match by {
        BookingSort::StartDate => bookings.sort_by_key(|b| b.start_date),
        BookingSort::TotalPrice => bookings.sort_by(|a, b| a.total_price.cmp(&b.total_price)),
    }
    if !ascending {
        bookings.reverse();
    }
}
