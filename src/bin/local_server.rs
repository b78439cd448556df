use std::sync::{Mutex, MutexGuard};

use estrada_survey::{
    chainage::parse_and_format_chainage,
    data_types::estrada::EstradaSurvey,
    geo::GeoUtils,
    map::{LayerStyle, MapSession, MemorySurface},
    App,
};
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{ContentType, Header, Status};
use rocket::{Request, Response, State};
use serde_derive::Serialize;

#[macro_use]
extern crate rocket;

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Cross-Origin-Resource-Sharing Fairing",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

struct MapState {
    session: MapSession,
    surface: MemorySurface,
}

type SharedMap = Mutex<MapState>;
type Reply = (Status, (ContentType, String));

#[derive(Serialize)]
struct SurveyView<'a> {
    #[serde(flatten)]
    survey: &'a EstradaSurvey,
    chainage: String,
    date_surveyed_display: Option<String>,
}

#[derive(Serialize)]
struct RenderView {
    layers: Vec<usize>,
    bounds: Option<[[f64; 2]; 2]>,
    center: Option<[f64; 2]>,
}

#[derive(Serialize)]
struct LayerView<'a> {
    pk: &'a str,
    #[serde(flatten)]
    style: LayerStyle,
}

fn json_reply<T: serde::Serialize>(value: &T) -> Reply {
    match serde_json::to_string(value) {
        Ok(json) => (Status::Ok, (ContentType::JSON, json)),
        Err(err) => (
            Status::InternalServerError,
            (ContentType::Text, err.to_string()),
        ),
    }
}

fn error_reply(status: Status, message: impl ToString) -> Reply {
    (status, (ContentType::Text, message.to_string()))
}

fn lock_map(state: &SharedMap) -> Result<MutexGuard<'_, MapState>, Reply> {
    state
        .lock()
        .map_err(|_| error_reply(Status::InternalServerError, "map state poisoned"))
}

#[options("/<_..>")]
fn all_options() {
    /* Intentionally left empty */
}

#[post("/surveys/decode", data = "<body>")]
fn decode_surveys(body: Vec<u8>, app: &State<App>) -> Reply {
    match app.decode_surveys(&body) {
        Ok(surveys) => {
            let views: Vec<SurveyView> = surveys
                .iter()
                .map(|survey| SurveyView {
                    survey,
                    chainage: survey.chainage_interval(),
                    date_surveyed_display: survey.date_surveyed_display(),
                })
                .collect();

            json_reply(&views)
        }
        Err(err) => error_reply(Status::BadRequest, err),
    }
}

#[get("/chainage/<value>")]
fn chainage_display(value: &str) -> Reply {
    match parse_and_format_chainage(value) {
        Ok(formatted) => (Status::Ok, (ContentType::Text, formatted)),
        Err(err) => error_reply(Status::BadRequest, err),
    }
}

#[post("/map/render", data = "<geojson>")]
fn render_map(geojson: String, state: &State<SharedMap>) -> Reply {
    let mut map = match lock_map(state) {
        Ok(map) => map,
        Err(reply) => return reply,
    };
    let MapState { session, surface } = &mut *map;

    match session.render_json(&geojson, surface) {
        Ok(group) => json_reply(&RenderView {
            layers: group.layers,
            bounds: group.bounds.map(|bounds| {
                [
                    [bounds.min().x, bounds.min().y],
                    [bounds.max().x, bounds.max().y],
                ]
            }),
            center: group.bounds.map(|bounds| {
                let center = GeoUtils::get_center_of_bbox(&bounds);
                [center.x, center.y]
            }),
        }),
        Err(err) => error_reply(Status::BadRequest, err),
    }
}

#[post("/map/filter?<road_type>")]
fn filter_layers(road_type: Option<&str>, state: &State<SharedMap>) -> Reply {
    let mut map = match lock_map(state) {
        Ok(map) => map,
        Err(reply) => return reply,
    };
    let MapState { session, surface } = &mut *map;

    session.filter(
        |properties| match road_type {
            Some(road_type) => {
                properties.get("roadType").and_then(|value| value.as_str()) == Some(road_type)
            }
            None => true,
        },
        surface,
    );

    let views: Vec<LayerView> = session
        .pks()
        .filter_map(|pk| {
            let layer = surface.layer(session.layer(pk)?)?;
            Some(LayerView {
                pk,
                style: layer.style,
            })
        })
        .collect();

    json_reply(&views)
}

#[post("/map/clear")]
fn clear_map(state: &State<SharedMap>) -> Status {
    match lock_map(state) {
        Ok(mut map) => {
            map.session.clear();
            map.surface.clear();
            Status::NoContent
        }
        Err((status, _)) => status,
    }
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = App::new()?;

    let limits = Limits::default()
        .limit("bytes", 16.mebibytes())
        .limit("string", 16.mebibytes());
    let figment = rocket::Config::figment().merge(("limits", limits));

    let launched = rocket::custom(figment)
        .attach(Cors)
        .manage(Mutex::new(MapState {
            session: MapSession::with_settings(&app.settings().map),
            surface: MemorySurface::new(),
        }))
        .manage(app)
        .mount(
            "/",
            routes![
                decode_surveys,
                chainage_display,
                render_map,
                filter_layers,
                clear_map,
                all_options
            ],
        )
        .launch()
        .await;

    if let Err(err) = launched {
        eprintln!("Server stopped: {}", err);
    }

    Ok(())
}
