use crate::core::controller::{AppEvent, ControllerOptions, Reaction, WorkoutController};
use crate::core::storage::KeyValueStorage;
use crate::core::surfaces::{
    FormSurface, GeolocationSource, ListSurface, MapSurface, Notifier, Surfaces,
};
use crate::errors::{AppError, AppResult};
use tracing::debug;

/// Start a session: build the controller, rehydrate, then deliver the
/// geolocation outcome (if the source produces one) as the first event.
pub fn boot<M, F, L, N, S, G>(
    surfaces: Surfaces<M, F, L, N>,
    storage: S,
    options: ControllerOptions,
    geolocation: &mut G,
) -> AppResult<(WorkoutController<M, F, L, N, S>, Reaction)>
where
    M: MapSurface,
    F: FormSurface,
    L: ListSurface,
    N: Notifier,
    S: KeyValueStorage,
    G: GeolocationSource + ?Sized,
{
    let mut controller = WorkoutController::new(surfaces, storage, options);
    controller.start();

    let reaction = match geolocation.current_position() {
        Some(Ok(coords)) => controller.handle(AppEvent::PositionResolved(coords))?,
        Some(Err(AppError::LocationUnavailable(reason))) => {
            controller.handle(AppEvent::PositionFailed(reason))?
        }
        Some(Err(e)) => controller.handle(AppEvent::PositionFailed(e.to_string()))?,
        None => {
            debug!("position request still pending");
            Reaction::Ignored
        }
    };

    Ok((controller, reaction))
}
