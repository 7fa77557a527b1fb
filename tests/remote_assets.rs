#![cfg(feature = "remote")]

//! Remote asset resolution against a local HTTP server

use std::collections::HashMap;
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use tiny_http::{Response, Server};
use toastforge::compositor::raster::encode_png;
use toastforge::compositor::SliceName;
use toastforge::{BatchEntry, Error, Generator, GeneratorConfig, PanelKind};

/// Serve `files` (path -> body) from an ephemeral port. `/broken/*` answers
/// 500, everything else unknown answers 404.
fn start_asset_server(files: HashMap<String, Vec<u8>>) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    let files = Arc::new(files);

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let path = request.url().to_string();
            let response = match files.get(&path) {
                Some(body) => Response::from_data(body.clone()),
                None if path.starts_with("/broken/") => {
                    Response::from_data(b"boom".to_vec()).with_status_code(500)
                }
                None => Response::from_data(b"Not Found".to_vec()).with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });

    format!("http://{}/", addr)
}

fn png(w: u32, h: u32, color: [u8; 4]) -> Vec<u8> {
    encode_png(&RgbaImage::from_pixel(w, h, Rgba(color))).unwrap()
}

fn repository(with_slices: bool) -> HashMap<String, Vec<u8>> {
    let mut files = HashMap::new();
    if with_slices {
        for name in SliceName::ALL {
            files.insert(format!("/assets/achievement/{}", name.file_name()), png(5, 5, [70, 70, 70, 255]));
        }
    }
    files.insert("/assets/icons/star.png".to_string(), png(24, 24, [255, 215, 0, 255]));
    files.insert(
        "/achievements.json".to_string(),
        br#"[
            {"id": "star", "title": "Reach for the stars", "subtitle": "Find a star", "icon": "assets/icons/star.png"},
            {"id": "gone", "title": "Lost", "subtitle": "Icon is 404", "icon": "assets/icons/missing.png"},
            {"id": "down", "title": "Down", "subtitle": "Server error", "icon": "broken/icon.png"}
        ]"#
        .to_vec(),
    );
    files
}

fn remote_config(base: &str, out: &std::path::Path) -> GeneratorConfig {
    GeneratorConfig {
        system_fonts: vec![],
        output_dir: out.to_path_buf(),
        timeout_ms: 5000,
        ..GeneratorConfig::remote(base)
    }
}

#[test]
fn remote_batch_applies_fallbacks_and_skips_failures() {
    let base = start_asset_server(repository(true));
    let tmp = tempfile::tempdir().unwrap();

    let generator = Generator::new(remote_config(&base, tmp.path())).expect("generator");
    assert!(generator.resolver().describe().starts_with("remote:"));

    let report = generator.generate_all("achievements.json").expect("descriptor fetch");

    let ids: Vec<&str> = report.generated.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, ["star", "gone"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].id, "down");
    assert!(report.failed[0].error.contains("500"));

    assert!(tmp.path().join("star.png").exists());
    assert!(tmp.path().join("gone.png").exists());
    assert!(!tmp.path().join("down.png").exists());

    for written in &report.generated {
        assert_eq!(written.panel, PanelKind::NineSlice);
    }

    let gone = &report.generated[1];
    let img = image::open(&gone.path).unwrap().to_rgba8();
    assert_eq!(*img.get_pixel(12, (gone.height - 40) / 2), Rgba([180, 180, 180, 255]));
}

#[test]
fn remote_without_slices_uses_rounded_panel() {
    let base = start_asset_server(repository(false));
    let tmp = tempfile::tempdir().unwrap();

    let report = Generator::new(remote_config(&base, tmp.path()))
        .unwrap()
        .generate_all("achievements.json")
        .unwrap();
    assert_eq!(report.generated.len(), 2);
    assert!(report.generated.iter().all(|w| w.panel == PanelKind::Rounded));
}

#[test]
fn absolute_icon_urls_are_fetched_directly() {
    let base = start_asset_server(repository(true));
    let mut elsewhere = HashMap::new();
    elsewhere.insert("/cdn/badge.png".to_string(), png(32, 32, [1, 2, 3, 255]));
    let icon_host = start_asset_server(elsewhere);

    let tmp = tempfile::tempdir().unwrap();
    let generator = Generator::new(remote_config(&base, tmp.path())).unwrap();
    let entry = BatchEntry::new("abs", "Abs", "").with_icon(format!("{}cdn/badge.png", icon_host));
    let badge = generator.render_entry(&entry).expect("render");
    assert_eq!(badge.layout.icon.width, 32);
    assert_eq!(*badge.image.get_pixel(12, badge.layout.icon.y as u32), Rgba([1, 2, 3, 255]));
}

#[test]
fn unreachable_repository_fails_the_entry() {
    let tmp = tempfile::tempdir().unwrap();
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let generator = Generator::new(remote_config(&format!("http://127.0.0.1:{}/", port), tmp.path())).unwrap();

    let err = generator.render_entry(&BatchEntry::new("x", "X", "")).err().expect("unreachable");
    assert!(matches!(err, Error::NetworkError(_)));
}

#[test]
fn missing_descriptor_is_reported() {
    let base = start_asset_server(HashMap::new());
    let tmp = tempfile::tempdir().unwrap();
    let err = Generator::new(remote_config(&base, tmp.path()))
        .unwrap()
        .generate_all("achievements.json")
        .unwrap_err();
    assert!(err.is_missing());
}
