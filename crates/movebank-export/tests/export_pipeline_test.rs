use movebank_client::{
    license_md5, DirectReadRequest, HttpResponse, MockHttpTransport, MovebankClient,
};
use movebank_domain::{
    Coordinate, EntityService, ExportPlan, ExportService, MovebankDocument, OUTPUT_FILE_NAME,
};
use movebank_export::JsonFileWriter;
use std::sync::Arc;

const TERMS: &str = "License Terms:\nCite the data owners in any publication.";

const STUDIES: &str = "id,name,i_can_see_data,there_are_data_which_i_cannot_see,sensor_type_ids\n\
                       9493874,Störche Südwest,true,false,\"GPS,Acceleration\"\n\
                       42,Bat colony,true,false,Radio Transmitter\n";

const INDIVIDUALS: &str = "id,local_identifier,study_id\n11,Prinzesschen,9493874\n";

const GPS: &str = "timestamp,deployment_id,location_lat,location_long\n\
                   2020-01-01 00:00:00.000,501,47.75,9.5\n\
                   2020-01-01 00:05:00.000,501,,\n";

const ACC: &str = "timestamp,deployment_id,tag_local_identifier,eobs_acceleration_sampling_frequency_per_axis,eobs_accelerations_raw\n\
                   2020-01-01 00:00:00.000000,501,2000,10,2048 2048 2048 3048 2048 2048\n";

fn param<'a>(request: &'a DirectReadRequest, key: &str) -> Option<&'a str> {
    request
        .params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn ok(body: &str, cookie: Option<&str>) -> HttpResponse {
    HttpResponse {
        url: "https://www.movebank.org/movebank/service/direct-read".to_string(),
        status: 200,
        body: body.as_bytes().to_vec(),
        cookie: cookie.map(str::to_string),
    }
}

/// Serves the study list behind a license and everything else directly.
fn movebank(request: DirectReadRequest) -> anyhow::Result<HttpResponse> {
    let response = match (param(&request, "entity_type"), param(&request, "sensor_type_id")) {
        (Some("study"), _) => match param(&request, "license-md5") {
            None => ok(TERMS, Some("JSESSIONID=session-1")),
            Some(hash)
                if hash == license_md5(TERMS.as_bytes())
                    && request.cookie.as_deref() == Some("JSESSIONID=session-1") =>
            {
                ok(STUDIES, None)
            }
            Some(_) => HttpResponse {
                status: 403,
                ..ok("", None)
            },
        },
        (Some("individual"), _) => ok(INDIVIDUALS, None),
        (Some("event"), Some("653")) => ok(GPS, None),
        (Some("event"), Some("2365683")) => ok(ACC, None),
        _ => HttpResponse {
            status: 400,
            ..ok("Bad request", None)
        },
    };
    Ok(response)
}

fn export_service(transport: MockHttpTransport, path: &std::path::Path) -> ExportService {
    ExportService::new(
        EntityService::new(Arc::new(MovebankClient::new(Arc::new(transport)))),
        Arc::new(JsonFileWriter::new(path)),
        ExportPlan::default(),
    )
}

#[tokio::test]
async fn test_export_writes_reloadable_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(OUTPUT_FILE_NAME);

    let mut transport = MockHttpTransport::new();
    // study (terms + reissue), individuals, gps events, acc events
    transport.expect_get().times(5).returning(movebank);

    let document = export_service(transport, &path).run().await.unwrap();

    assert_eq!(document.all_studies.len(), 2);
    assert_eq!(document.gps_studies.len(), 1);
    assert_eq!(document.individuals.len(), 1);

    let gps = document.gps_events.as_ref().unwrap();
    assert_eq!(gps.len(), 2);
    assert_eq!(gps[0].latitude, Coordinate::Degrees(47.75));
    assert_eq!(gps[1].latitude, Coordinate::Unparsed(String::new()));

    let acc = document.acc_events.as_ref().unwrap();
    assert_eq!(acc.len(), 2);
    assert_eq!(acc[1].timestamp, "2020-01-01 00:00:00.100000");
    assert!((acc[1].x - 9.81).abs() < 1e-9);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"all_studies\": [\n    {\n      \"id\""));
    assert!(text.contains("Störche Südwest"));

    let reloaded: MovebankDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(reloaded, document);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value["gps_events"][1],
        serde_json::json!(["2020-01-01 00:05:00.000", "501", "", ""])
    );
    assert_eq!(value["acc_events"][0][0], "2020-01-01 00:00:00.000000");
}

#[tokio::test]
async fn test_export_with_unreachable_service_writes_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(OUTPUT_FILE_NAME);

    let mut transport = MockHttpTransport::new();
    transport.expect_get().times(2).returning(|_| {
        Ok(HttpResponse {
            url: "https://www.movebank.org/movebank/service/direct-read".to_string(),
            status: 401,
            body: b"Unauthorized".to_vec(),
            cookie: None,
        })
    });

    export_service(transport, &path).run().await.unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "all_studies": [],
            "gps_studies": [],
            "individuals": []
        })
    );
}
