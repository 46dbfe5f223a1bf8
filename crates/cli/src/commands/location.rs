//! Live location with a fixed-position sensor.

use tracing::info;

use tanish_arts_storefront::models::Coordinates;
use tanish_arts_storefront::services::{LocationFix, StaticSensor};
use tanish_arts_storefront::{DurableStore, Storefront};

/// Run one live-location query.
///
/// Without both `--lat` and `--lon` the device is treated as having no
/// sensor.
pub async fn locate<S: DurableStore>(
    storefront: &mut Storefront<S>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
) {
    let sensor = match (lat, lon) {
        (Some(latitude), Some(longitude)) => {
            let fix = LocationFix::new(Coordinates {
                latitude,
                longitude,
            });
            StaticSensor::located(match city {
                Some(city) => fix.with_city(city),
                None => fix,
            })
        }
        _ => StaticSensor::unsupported(),
    };

    if storefront.fetch_live_location(&sensor).await {
        if let Some(coordinates) = storefront.live_location().coordinates {
            info!(
                latitude = coordinates.latitude,
                longitude = coordinates.longitude,
                "Position recorded"
            );
        }
    }
}
