use fleet_forms::list::{ListFilter, ListRecord, RecordList};
use fleet_lib::FleetClient;
use fleet_lib::api::{BookingQuery, Page, VehicleQuery};
use fleet_lib::model::{Booking, BookingStatus, Vehicle, VehicleStatus};

use super::{BookingListArgs, VehicleListArgs};
use crate::error::CliError;
use crate::output;

/// Page size used when scanning for a single record.
const SCAN_PAGE_SIZE: usize = 100;

/// Filters one server page locally by free text.
fn local_view<T: ListRecord>(list: &RecordList<T>, search: Option<String>) -> Page<&T> {
    let mut filter = ListFilter::default().per_page(list.len().max(1));
    if let Some(text) = search {
        filter = filter.search(text);
    }
    list.view(&filter)
}

pub async fn vehicles(client: &FleetClient, args: VehicleListArgs) -> Result<(), CliError> {
    let mut query = VehicleQuery::default().page(args.page);
    if let Some(status) = args.status {
        query = query.status(status);
    }
    let page = client.list_vehicles(&query).await?;
    let server_page = (page.page(), page.total_pages(), page.total());
    let list = RecordList::new(page.into_items());
    output::rows(&local_view(&list, args.search), output::format_vehicle, server_page);
    Ok(())
}

pub async fn bookings(client: &FleetClient, args: BookingListArgs) -> Result<(), CliError> {
    let mut query = BookingQuery::default().page(args.page);
    if let Some(status) = args.status {
        query = query.status(status);
    }
    if let Some(customer) = args.customer {
        query = query.customer(customer);
    }
    let page = client.list_bookings(&query).await?;
    let server_page = (page.page(), page.total_pages(), page.total());
    let list = RecordList::new(page.into_items());
    output::rows(&local_view(&list, args.search), output::format_booking, server_page);
    Ok(())
}

/// Returns the page to request after `page`, or `None` once the scan is
/// exhausted or the server stopped advancing.
fn next_scan_page<T>(page: &Page<T>, requested: usize) -> Option<usize> {
    if page.is_empty() || page.page() != requested || !page.has_more() {
        return None;
    }
    Some(requested + 1)
}

async fn find_vehicle(client: &FleetClient, id: &str) -> Result<Vehicle, CliError> {
    let mut query = VehicleQuery::default().per_page(SCAN_PAGE_SIZE);
    loop {
        let page = client.list_vehicles(&query).await?;
        let next = next_scan_page(&page, query.page);
        if let Some(vehicle) = page.into_items().into_iter().find(|v| v.id == id) {
            return Ok(vehicle);
        }
        match next {
            Some(next) => query = query.page(next),
            None => {
                return Err(CliError::NotFound {
                    kind: "vehicle",
                    id: id.to_string(),
                });
            }
        }
    }
}

async fn find_booking(client: &FleetClient, id: &str) -> Result<Booking, CliError> {
    let mut query = BookingQuery::default().per_page(SCAN_PAGE_SIZE);
    loop {
        let page = client.list_bookings(&query).await?;
        let next = next_scan_page(&page, query.page);
        if let Some(booking) = page.into_items().into_iter().find(|b| b.id == id) {
            return Ok(booking);
        }
        match next {
            Some(next) => query = query.page(next),
            None => {
                return Err(CliError::NotFound {
                    kind: "booking",
                    id: id.to_string(),
                });
            }
        }
    }
}

pub async fn vehicle_status(
    client: &FleetClient,
    id: &str,
    status: VehicleStatus,
) -> Result<(), CliError> {
    let mut list = RecordList::new(vec![find_vehicle(client, id).await?]);
    let result = list.update_status(client, id, status).await;
    output::toasts(&list.take_toasts());
    result?;
    if let Some(vehicle) = list.get(id) {
        output::vehicle(vehicle);
    }
    Ok(())
}

pub async fn booking_status(
    client: &FleetClient,
    id: &str,
    status: BookingStatus,
) -> Result<(), CliError> {
    let mut list = RecordList::new(vec![find_booking(client, id).await?]);
    let result = list.update_status(client, id, status).await;
    output::toasts(&list.take_toasts());
    result?;
    if let Some(booking) = list.get(id) {
        output::booking(booking);
    }
    Ok(())
}
