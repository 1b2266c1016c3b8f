//! Scraper coordinator - the two-phase crawl/download engine
//!
//! Phase 1 walks the paginated list pages and collects the unique set of
//! profile URLs. Phase 2 visits every profile, gives the animal a folder
//! and downloads its gallery into it.
//!
//! Every fetch, extraction call and download is isolated: a failure costs
//! at most the page, profile or image it happened on. The only signal that
//! changes the loop structure is a 404 on a list page, which ends
//! pagination.

use crate::config::{validate_run_config, RunConfig};
use crate::crawler::adapter::SiteAdapter;
use crate::crawler::downloader::{download_image, DownloadOutcome};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::namer::{folder_name, unique_image_filename, TokenSource, UuidTokenSource};
use crate::output::RunSummary;
use crate::{Result, ScraperError};
use reqwest::Client;
use scraper::Html;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use url::Url;

/// Lifecycle of a scraper run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScraperState {
    /// Created, nothing fetched yet
    Idle,
    /// Phase 1: walking list pages
    CollectingProfiles,
    /// Phase 2: visiting profiles and saving images
    DownloadingImages,
    /// Both phases finished
    Done,
}

/// A profile page reduced to what phase 2 needs
struct ProfileGallery {
    folder: PathBuf,
    image_urls: Vec<String>,
}

/// The crawl/download engine for one site
pub struct Scraper<A: SiteAdapter> {
    config: RunConfig,
    adapter: A,
    client: Client,
    tokens: Box<dyn TokenSource + Send>,
    state: ScraperState,
    profile_urls: HashSet<String>,
    profile_folders: HashMap<String, PathBuf>,
    summary: RunSummary,
}

impl<A: SiteAdapter> Scraper<A> {
    /// Creates a new scraper
    ///
    /// Validates the configuration, builds the HTTP client and creates the
    /// output directory.
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration
    /// * `adapter` - Site-specific extraction
    ///
    /// # Returns
    ///
    /// * `Ok(Scraper)` - Ready to run
    /// * `Err(ScraperError)` - Invalid configuration or unusable output directory
    pub fn new(config: RunConfig, adapter: A) -> Result<Self> {
        validate_run_config(&config)?;

        let client = build_http_client(&config)?;

        std::fs::create_dir_all(&config.output_dir).map_err(|source| ScraperError::OutputDir {
            path: config.output_dir.display().to_string(),
            source,
        })?;
        tracing::info!("Output directory: {}", display_absolute(&config.output_dir));

        let summary = RunSummary::new(config.start_page, config.end_page, config.output_dir.clone());

        Ok(Self {
            config,
            adapter,
            client,
            tokens: Box::new(UuidTokenSource),
            state: ScraperState::Idle,
            profile_urls: HashSet::new(),
            profile_folders: HashMap::new(),
            summary,
        })
    }

    /// Replaces the random token source used for folder and file names
    pub fn with_token_source(mut self, tokens: impl TokenSource + Send + 'static) -> Self {
        self.tokens = Box::new(tokens);
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> ScraperState {
        self.state
    }

    /// Profile URLs collected so far
    pub fn profile_urls(&self) -> &HashSet<String> {
        &self.profile_urls
    }

    /// Folder assigned to a profile, if it has been visited
    pub fn folder_for(&self, profile_url: &str) -> Option<&Path> {
        self.profile_folders.get(profile_url).map(PathBuf::as_path)
    }

    /// Counters for the run so far
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Runs both phases and returns the final counters
    pub async fn run(&mut self) -> RunSummary {
        tracing::info!(
            "Starting {} scraper: {} (pages {}-{})",
            self.adapter.name(),
            self.config.base_url,
            self.config.start_page,
            self.config.end_page
        );

        self.collect_profile_urls().await;
        self.download_images_from_profiles().await;
        self.state = ScraperState::Done;

        self.log_summary();
        self.summary.clone()
    }

    /// Phase 1: collects unique profile URLs from the list pages
    ///
    /// Pages are fetched in ascending order. A 404 ends pagination; any
    /// other failure skips just that page.
    pub async fn collect_profile_urls(&mut self) {
        self.state = ScraperState::CollectingProfiles;
        tracing::info!(
            "Phase 1: collecting profile links from list pages {} to {}",
            self.config.start_page,
            self.config.end_page
        );

        for page in self.config.start_page..=self.config.end_page {
            let page_url = self.adapter.page_url(&self.config.base_url, page);
            tracing::info!("Processing list page {}: {}", page, page_url);

            let (final_url, body) = match fetch_page(&self.client, &page_url).await {
                FetchResult::Success { final_url, body } => (final_url, body),
                FetchResult::NotFound => {
                    tracing::info!("List page {} not found (404), end of pagination", page);
                    break;
                }
                FetchResult::Failed { error } => {
                    tracing::warn!("Failed to fetch list page {}: {}, skipping", page_url, error);
                    continue;
                }
            };
            self.summary.pages_scanned += 1;
            if final_url != page_url {
                tracing::debug!("List page {} redirected to {}", page_url, final_url);
            }

            let links = self.extract_profile_links(&final_url, &body);
            if links.is_empty() {
                tracing::info!("No profile links found on page {}", page);
            } else {
                tracing::info!("Found {} profile links on page {}", links.len(), page);
                self.profile_urls.extend(links);
            }
        }

        self.summary.profiles_found = self.profile_urls.len();
        tracing::info!(
            "Phase 1 finished: {} unique profile links",
            self.profile_urls.len()
        );
    }

    /// Phase 2: downloads the gallery of every collected profile
    pub async fn download_images_from_profiles(&mut self) {
        self.state = ScraperState::DownloadingImages;
        tracing::info!("Phase 2: downloading images from profile pages");

        let profiles: Vec<String> = self.profile_urls.iter().cloned().collect();
        let total = profiles.len();
        if total == 0 {
            tracing::info!("No profile links to process");
            return;
        }

        for (index, profile_url) in profiles.iter().enumerate() {
            self.summary.profiles_processed += 1;
            tracing::info!("[{}/{}] Processing profile: {}", index + 1, total, profile_url);

            let (final_url, body) = match fetch_page(&self.client, profile_url).await {
                FetchResult::Success { final_url, body } => (final_url, body),
                FetchResult::NotFound => {
                    tracing::warn!("Profile {} not found (404), skipping", profile_url);
                    self.summary.profiles_skipped += 1;
                    continue;
                }
                FetchResult::Failed { error } => {
                    tracing::warn!("Failed to fetch profile {}: {}, skipping", profile_url, error);
                    self.summary.profiles_skipped += 1;
                    continue;
                }
            };

            let Some(gallery) = self.prepare_profile(profile_url, &final_url, &body).await else {
                self.summary.profiles_skipped += 1;
                continue;
            };

            let folder_label = folder_label(&gallery.folder);
            if gallery.image_urls.is_empty() {
                tracing::warn!("No gallery images found for folder '{}'", folder_label);
                continue;
            }
            tracing::info!("Found {} images in gallery", gallery.image_urls.len());

            let downloaded = self.download_gallery(&gallery).await;
            if downloaded > 0 {
                tracing::info!(
                    "Downloaded {} new images into '{}'",
                    downloaded,
                    folder_label
                );
            } else {
                tracing::info!("No new images downloaded into '{}'", folder_label);
            }
            self.summary.images_downloaded += downloaded;
        }

        tracing::info!(
            "Phase 2 finished: processed {} profiles",
            self.summary.profiles_processed
        );
    }

    /// Runs `find_profile_links` on a list page body
    fn extract_profile_links(&self, page_url: &str, body: &str) -> Vec<String> {
        let page_url = match Url::parse(page_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Cannot parse list page URL {}: {}", page_url, e);
                return Vec::new();
            }
        };

        let document = Html::parse_document(body);
        match self.adapter.find_profile_links(&document, &page_url) {
            Ok(links) => links,
            Err(e) => {
                tracing::error!("find_profile_links failed on {}: {}", page_url, e);
                Vec::new()
            }
        }
    }

    /// Resolves the profile's folder and gallery from its page body
    ///
    /// `profile_url` keys the folder map; relative image links resolve
    /// against `final_url`. Returns `None` when the profile cannot be
    /// handled at all: its URL does not parse or its folder cannot be
    /// created.
    async fn prepare_profile(
        &mut self,
        profile_url: &str,
        final_url: &str,
        body: &str,
    ) -> Option<ProfileGallery> {
        let page_url = match Url::parse(final_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Cannot parse profile URL {}: {}", final_url, e);
                return None;
            }
        };

        let existing = self.profile_folders.get(profile_url).cloned();
        let (pet_name, image_urls) = self.extract_profile(&page_url, body, existing.is_none());

        let folder = match existing {
            Some(folder) => {
                tracing::info!(
                    "Reusing existing folder for this profile: {}",
                    folder_label(&folder)
                );
                folder
            }
            None => self.assign_folder(profile_url, pet_name).await?,
        };

        Some(ProfileGallery { folder, image_urls })
    }

    /// Runs `find_pet_name` (when asked) and `find_image_urls` on a profile body
    ///
    /// The parsed document is dropped before returning.
    fn extract_profile(
        &self,
        page_url: &Url,
        body: &str,
        wants_name: bool,
    ) -> (Option<String>, Vec<String>) {
        let document = Html::parse_document(body);

        let pet_name = if wants_name {
            match self.adapter.find_pet_name(&document) {
                Ok(name) => name,
                Err(e) => {
                    tracing::error!("find_pet_name failed on {}: {}", page_url, e);
                    None
                }
            }
        } else {
            None
        };

        let image_urls = match self.adapter.find_image_urls(&document, page_url) {
            Ok(urls) => urls,
            Err(e) => {
                tracing::error!("find_image_urls failed on {}: {}", page_url, e);
                Vec::new()
            }
        };

        (pet_name, image_urls)
    }

    /// Names and creates the folder for a profile seen for the first time
    async fn assign_folder(&mut self, profile_url: &str, pet_name: Option<String>) -> Option<PathBuf> {
        let name = folder_name(pet_name.as_deref(), self.tokens.as_mut());
        match pet_name.as_deref().map(str::trim) {
            Some(found) if !found.is_empty() => {
                tracing::info!("Found name '{}' -> folder '{}'", found, name)
            }
            _ => tracing::warn!("Pet name not found, using folder '{}'", name),
        }

        let folder = self.config.output_dir.join(&name);
        if let Err(e) = tokio::fs::create_dir_all(&folder).await {
            tracing::error!("Cannot create folder {}: {}", folder.display(), e);
            return None;
        }

        self.profile_folders
            .insert(profile_url.to_string(), folder.clone());
        Some(folder)
    }

    /// Downloads every image of a gallery, returning how many were new
    async fn download_gallery(&mut self, gallery: &ProfileGallery) -> usize {
        let mut downloaded = 0;

        for image_url in &gallery.image_urls {
            let filename = unique_image_filename(self.tokens.as_mut());
            let destination = gallery.folder.join(&filename);

            match download_image(&self.client, image_url, &destination).await {
                DownloadOutcome::Downloaded { bytes } => {
                    tracing::debug!("Saved {} ({} bytes) as {}", image_url, bytes, filename);
                    downloaded += 1;
                }
                DownloadOutcome::Skipped => {
                    self.summary.images_skipped += 1;
                }
                DownloadOutcome::Failed(e) => {
                    tracing::warn!("Failed to download image {}: {}", image_url, e);
                    self.summary.images_failed += 1;
                }
            }
        }

        downloaded
    }

    fn log_summary(&self) {
        let summary = &self.summary;
        tracing::info!(
            "Scanned list pages {}-{} ({} fetched)",
            summary.start_page,
            summary.end_page,
            summary.pages_scanned
        );
        tracing::info!("Unique profile links collected: {}", summary.profiles_found);
        tracing::info!("New images downloaded: {}", summary.images_downloaded);
        tracing::info!(
            "Images saved in: {}",
            display_absolute(&summary.output_dir)
        );
    }
}

fn folder_label(folder: &Path) -> String {
    folder
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string())
}

fn display_absolute(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
