use fleet_forms::forms::{AddVehicleForm, BookVehicleForm, SearchAvailabilityForm, field};
use fleet_forms::submission::{Form, FormController, SubmitOutcome};
use fleet_forms::validation::FormState;
use fleet_lib::FleetClient;

use super::{AddVehicleArgs, BookArgs, RouteArgs};
use crate::error::CliError;
use crate::output;

/// Submits `values` once and prints what the form reports.
///
/// There is no banner to show on a terminal, so the success delay is dropped.
async fn submit<F: Form>(
    client: &FleetClient,
    form: F,
    values: FormState,
) -> Result<F::Output, CliError> {
    let mut controller = FormController::new(form)
        .with_values(values)
        .with_reset_delay(None);
    let outcome = controller.submit(client).await;
    output::toasts(&controller.take_toasts());
    output::field_errors(controller.errors());
    match outcome {
        SubmitOutcome::Succeeded(output) => Ok(output),
        SubmitOutcome::Rejected(rejection) => Err(rejection.into()),
        SubmitOutcome::Failed(err) => Err(err.into()),
    }
}

pub async fn add_vehicle(client: &FleetClient, args: AddVehicleArgs) -> Result<(), CliError> {
    let values = FormState::new()
        .with(field::NAME, args.name)
        .with(field::CAPACITY_KG, args.capacity)
        .with(field::TYRES, args.tyres);
    let vehicle = submit(client, AddVehicleForm::new(), values).await?;
    output::vehicle(&vehicle);
    Ok(())
}

pub async fn search(client: &FleetClient, args: RouteArgs) -> Result<(), CliError> {
    let values = FormState::new()
        .with(field::CAPACITY_REQUIRED, args.capacity)
        .with(field::FROM_PINCODE, args.from)
        .with(field::TO_PINCODE, args.to)
        .with(field::START_TIME, args.start);
    let vehicles = submit(client, SearchAvailabilityForm::new(), values).await?;
    for available in &vehicles {
        println!("{}", output::format_available(available));
    }
    Ok(())
}

pub async fn book(client: &FleetClient, args: BookArgs) -> Result<(), CliError> {
    let preview = match (&args.from, &args.to, &args.start) {
        (Some(from), Some(to), Some(start)) => output::format_estimate(from, to, start),
        _ => None,
    };
    if let Some(preview) = preview {
        println!("{}", preview);
    }
    let values = FormState::new()
        .with(field::VEHICLE_ID, args.vehicle)
        .with(field::CUSTOMER_ID, args.customer)
        .with(field::FROM_PINCODE, args.from)
        .with(field::TO_PINCODE, args.to)
        .with(field::START_TIME, args.start);
    let booking = submit(client, BookVehicleForm::new(), values).await?;
    output::booking(&booking);
    Ok(())
}
