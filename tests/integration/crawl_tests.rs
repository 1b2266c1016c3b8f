//! Integration tests for the scraper
//!
//! These tests use wiremock to stand up a fake shelter website and run
//! the full two-phase scrape end-to-end into a temporary directory.

use scraper::Html;
use shelter_scraper::config::RunConfig;
use shelter_scraper::crawler::{scrape, Scraper, ScraperState, SiteAdapter};
use shelter_scraper::sites::{Warszawa, Wroclaw};
use shelter_scraper::{ExtractionError, ExtractionResult};
use std::path::Path;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a Wrocław-style list page linking to the given profile paths
fn wroclaw_list(profiles: &[&str]) -> String {
    let items: String = profiles
        .iter()
        .map(|p| format!(r#"<a class="breakdance-image-link" href="{}"><img src="/t.jpg"></a>"#, p))
        .collect();
    format!("<html><body>{}</body></html>", items)
}

/// Builds a Wrocław-style profile page
fn wroclaw_profile(name: &str, images: &[&str]) -> String {
    let gallery: String = images
        .iter()
        .map(|src| format!(r#"<img class="breakdance-image-object" src="{}">"#, src))
        .collect();
    format!(
        r#"<html><body><h1 class="bde-heading">{}</h1>{}</body></html>"#,
        name, gallery
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

fn jpeg() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])
        .insert_header("content-type", "image/jpeg")
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Lists the animal folders in `out` with the number of files in each
fn folder_contents(out: &Path) -> Vec<(String, usize)> {
    let mut folders: Vec<(String, usize)> = std::fs::read_dir(out)
        .expect("Failed to read output dir")
        .map(|entry| {
            let entry = entry.expect("Failed to read entry");
            let files = std::fs::read_dir(entry.path())
                .expect("Failed to read animal folder")
                .count();
            (entry.file_name().to_string_lossy().into_owned(), files)
        })
        .collect();
    folders.sort();
    folders
}

#[tokio::test]
async fn test_end_to_end_two_profiles() {
    let server = MockServer::start().await;

    mount(&server, "/psy/", html(wroclaw_list(&["/zwierze/burek/", "/zwierze/azor/"]))).await;
    mount(&server, "/zwierze/burek/", html(wroclaw_profile("Burek", &["/img/burek.jpg"]))).await;
    mount(&server, "/zwierze/azor/", html(wroclaw_profile("Azor", &["/img/azor.jpg"]))).await;
    mount(&server, "/img/burek.jpg", jpeg()).await;
    mount(&server, "/img/azor.jpg", jpeg()).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir.path().join("dataset");
    let config = RunConfig::new(format!("{}/psy/", server.uri()), &out).with_pages(1, 1);

    let summary = scrape(config, Wroclaw).await.expect("Scrape failed to start");

    assert_eq!(summary.pages_scanned, 1);
    assert_eq!(summary.profiles_found, 2);
    assert_eq!(summary.profiles_processed, 2);
    assert_eq!(summary.images_downloaded, 2);
    assert_eq!(summary.images_failed, 0);

    let folders = folder_contents(&out);
    assert_eq!(folders.len(), 2);
    assert!(folders[0].0.starts_with("Azor-"));
    assert!(folders[1].0.starts_with("Burek-"));
    assert!(folders.iter().all(|(_, files)| *files == 1));

    let azor_dir = out.join(&folders[0].0);
    let image = std::fs::read_dir(&azor_dir)
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    assert_eq!(image.extension().unwrap(), "jpg");
    assert_eq!(std::fs::read(image).unwrap().len(), 6);
}

#[tokio::test]
async fn test_pagination_stops_at_not_found() {
    let server = MockServer::start().await;

    mount(&server, "/psy/", html(wroclaw_list(&["/zwierze/a/"]))).await;
    mount(&server, "/psy/page/2/", html(wroclaw_list(&["/zwierze/b/"]))).await;
    Mock::given(method("GET"))
        .and(path("/psy/page/3/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/psy/page/4/"))
        .respond_with(html(wroclaw_list(&["/zwierze/c/"])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/psy/page/5/"))
        .respond_with(html(wroclaw_list(&["/zwierze/d/"])))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = RunConfig::new(format!("{}/psy/", server.uri()), dir.path()).with_pages(1, 5);
    let mut scraper = Scraper::new(config, Wroclaw).expect("Failed to create scraper");

    scraper.collect_profile_urls().await;

    assert_eq!(scraper.summary().pages_scanned, 2);
    let mut found: Vec<&String> = scraper.profile_urls().iter().collect();
    found.sort();
    assert_eq!(
        found,
        vec![
            &format!("{}/zwierze/a/", server.uri()),
            &format!("{}/zwierze/b/", server.uri()),
        ]
    );
}

#[tokio::test]
async fn test_same_profile_on_two_pages_is_scraped_once() {
    let server = MockServer::start().await;

    mount(&server, "/psy/", html(wroclaw_list(&["/zwierze/luna/"]))).await;
    mount(&server, "/psy/page/2/", html(wroclaw_list(&["/zwierze/luna/"]))).await;
    Mock::given(method("GET"))
        .and(path("/zwierze/luna/"))
        .respond_with(html(wroclaw_profile("Luna", &["/img/luna.jpg"])))
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, "/img/luna.jpg", jpeg()).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = RunConfig::new(format!("{}/psy/", server.uri()), dir.path()).with_pages(1, 2);

    let summary = scrape(config, Wroclaw).await.expect("Scrape failed to start");

    assert_eq!(summary.profiles_found, 1);
    assert_eq!(summary.images_downloaded, 1);
    assert_eq!(folder_contents(dir.path()).len(), 1);
}

#[tokio::test]
async fn test_same_name_animals_get_separate_folders() {
    let server = MockServer::start().await;

    mount(&server, "/psy/", html(wroclaw_list(&["/zwierze/reksio-1/", "/zwierze/reksio-2/"]))).await;
    mount(&server, "/zwierze/reksio-1/", html(wroclaw_profile("Reksio", &["/img/r1.jpg"]))).await;
    mount(&server, "/zwierze/reksio-2/", html(wroclaw_profile("Reksio (2)", &["/img/r2.jpg"]))).await;
    mount(&server, "/img/r1.jpg", jpeg()).await;
    mount(&server, "/img/r2.jpg", jpeg()).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = RunConfig::new(format!("{}/psy/", server.uri()), dir.path()).with_pages(1, 1);

    scrape(config, Wroclaw).await.expect("Scrape failed to start");

    let folders = folder_contents(dir.path());
    assert_eq!(folders.len(), 2);
    assert!(folders.iter().all(|(name, files)| name.starts_with("Reksio-") && *files == 1));
    assert_ne!(folders[0].0, folders[1].0);
}

#[tokio::test]
async fn test_unnamed_animal_uses_fallback_folder() {
    let server = MockServer::start().await;

    mount(&server, "/psy/", html(wroclaw_list(&["/zwierze/x/"]))).await;
    mount(
        &server,
        "/zwierze/x/",
        html(r#"<html><body><img class="breakdance-image-object" src="/img/x.jpg"></body></html>"#.to_string()),
    )
    .await;
    mount(&server, "/img/x.jpg", jpeg()).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = RunConfig::new(format!("{}/psy/", server.uri()), dir.path()).with_pages(1, 1);

    scrape(config, Wroclaw).await.expect("Scrape failed to start");

    let folders = folder_contents(dir.path());
    assert_eq!(folders.len(), 1);
    assert!(folders[0].0.starts_with("bez_nazwy-"));
}

/// Wrocław markup, except the gallery of one chosen profile cannot be read
struct BrokenGallery {
    broken_path: &'static str,
}

impl SiteAdapter for BrokenGallery {
    fn name(&self) -> &str {
        "broken-gallery"
    }

    fn find_profile_links(&self, document: &Html, page_url: &Url) -> ExtractionResult<Vec<String>> {
        Wroclaw.find_profile_links(document, page_url)
    }

    fn find_pet_name(&self, document: &Html) -> ExtractionResult<Option<String>> {
        Wroclaw.find_pet_name(document)
    }

    fn find_image_urls(&self, document: &Html, page_url: &Url) -> ExtractionResult<Vec<String>> {
        if page_url.path() == self.broken_path {
            return Err(ExtractionError::Other("gallery widget not found".to_string()));
        }
        Wroclaw.find_image_urls(document, page_url)
    }
}

#[tokio::test]
async fn test_extraction_failure_is_isolated() {
    let server = MockServer::start().await;

    mount(&server, "/psy/", html(wroclaw_list(&["/zwierze/a/", "/zwierze/b/"]))).await;
    mount(&server, "/zwierze/a/", html(wroclaw_profile("Azor", &["/img/a.jpg"]))).await;
    mount(&server, "/zwierze/b/", html(wroclaw_profile("Bary", &["/img/b1.jpg", "/img/b2.jpg"]))).await;
    Mock::given(method("GET"))
        .and(path("/img/a.jpg"))
        .respond_with(jpeg())
        .expect(0)
        .mount(&server)
        .await;
    mount(&server, "/img/b1.jpg", jpeg()).await;
    mount(&server, "/img/b2.jpg", jpeg()).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = RunConfig::new(format!("{}/psy/", server.uri()), dir.path()).with_pages(1, 1);
    let adapter = BrokenGallery {
        broken_path: "/zwierze/a/",
    };

    let summary = scrape(config, adapter).await.expect("Scrape failed to start");

    assert_eq!(summary.profiles_processed, 2);
    assert_eq!(summary.images_downloaded, 2);

    let folders = folder_contents(dir.path());
    assert_eq!(folders.len(), 2);
    assert!(folders[0].0.starts_with("Azor-"));
    assert_eq!(folders[0].1, 0);
    assert!(folders[1].0.starts_with("Bary-"));
    assert_eq!(folders[1].1, 2);
}

#[tokio::test]
async fn test_failed_profile_does_not_stop_run() {
    let server = MockServer::start().await;

    mount(&server, "/psy/", html(wroclaw_list(&["/zwierze/down/", "/zwierze/ok/"]))).await;
    Mock::given(method("GET"))
        .and(path("/zwierze/down/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    mount(&server, "/zwierze/ok/", html(wroclaw_profile("Figa", &["/img/figa.jpg"]))).await;
    mount(&server, "/img/figa.jpg", jpeg()).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = RunConfig::new(format!("{}/psy/", server.uri()), dir.path()).with_pages(1, 1);
    let mut scraper = Scraper::new(config, Wroclaw).expect("Failed to create scraper");

    let summary = scraper.run().await;

    assert_eq!(scraper.state(), ScraperState::Done);
    assert_eq!(summary.profiles_processed, 2);
    assert_eq!(summary.profiles_skipped, 1);
    assert_eq!(summary.images_downloaded, 1);
    assert_eq!(folder_contents(dir.path()).len(), 1);
}

#[tokio::test]
async fn test_second_run_adds_new_folders() {
    // Image files get random names, so a repeat run saves the gallery again
    // under a fresh folder instead of recognising what is already on disk.
    let server = MockServer::start().await;

    mount(&server, "/psy/", html(wroclaw_list(&["/zwierze/tofik/"]))).await;
    mount(&server, "/zwierze/tofik/", html(wroclaw_profile("Tofik", &["/img/tofik.jpg"]))).await;
    mount(&server, "/img/tofik.jpg", jpeg()).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = RunConfig::new(format!("{}/psy/", server.uri()), dir.path()).with_pages(1, 1);

    let first = scrape(config.clone(), Wroclaw).await.expect("First run failed");
    let second = scrape(config, Wroclaw).await.expect("Second run failed");

    assert_eq!(first.images_downloaded, 1);
    assert_eq!(second.images_downloaded, 1);
    assert_eq!(folder_contents(dir.path()).len(), 2);
}

#[tokio::test]
async fn test_warszawa_query_pagination() {
    let server = MockServer::start().await;

    let list_page = |slug: &str| {
        html(format!(
            r#"<html><body><a href="/zwierzeta/{}/">dowiedz się więcej</a></body></html>"#,
            slug
        ))
    };

    Mock::given(method("GET"))
        .and(path("/adopcje/"))
        .and(query_param("pet_page", "2"))
        .respond_with(list_page("mia"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/adopcje/"))
        .and(query_param("pet_page", "3"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    // Mounted last so the more specific pet_page mocks take priority
    Mock::given(method("GET"))
        .and(path("/adopcje/"))
        .respond_with(list_page("reksio"))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = RunConfig::new(format!("{}/adopcje/?pet_sex=0", server.uri()), dir.path())
        .with_pages(1, 4);
    let mut scraper = Scraper::new(config, Warszawa).expect("Failed to create scraper");

    scraper.collect_profile_urls().await;

    assert_eq!(scraper.summary().pages_scanned, 2);
    assert_eq!(scraper.profile_urls().len(), 2);
    assert!(scraper
        .profile_urls()
        .contains(&format!("{}/zwierzeta/mia/", server.uri())));
}
