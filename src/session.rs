// ============================================================================
// Wallpaper Session
// ============================================================================
// One session per running program. It owns the resolved config and the
// state the triggers share: the wallhaven record of the last fetched image
// and the path last handed to swaybg.
// ============================================================================

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use crate::applier::Applier;
use crate::compositor::Compositor;
use crate::config::Config;
use crate::error::{Result, WallpaperError};
use crate::http::HttpClient;
use crate::info;
use crate::launcher::CommandLauncher;
use crate::save;
use crate::source::Source;
use crate::wallhaven::ImageMetadata;

pub struct Session {
    config: Config,
    wallpaper_file: PathBuf,
    home_dir: Option<PathBuf>,
    client: Box<dyn HttpClient>,
    launcher: Box<dyn CommandLauncher>,
    compositor: Compositor,
    metadata: Option<ImageMetadata>,
    current: Option<PathBuf>,
}

impl Session {
    pub fn new(
        config: Config,
        wallpaper_file: PathBuf,
        home_dir: Option<PathBuf>,
        client: Box<dyn HttpClient>,
        launcher: Box<dyn CommandLauncher>,
        compositor: Compositor,
    ) -> Self {
        Session {
            config,
            wallpaper_file,
            home_dir,
            client,
            launcher,
            compositor,
            metadata: None,
            current: None,
        }
    }

    pub fn wallpaper_file(&self) -> &Path {
        &self.wallpaper_file
    }

    pub fn metadata(&self) -> Option<&ImageMetadata> {
        self.metadata.as_ref()
    }

    /// Image currently set as background, if any cycle succeeded
    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// Fetch a new image and apply it.
    ///
    /// Session state only changes once the fetch succeeded; a local pick
    /// clears the wallhaven record since the new image has none.
    pub fn refresh(&mut self) -> Result<PathBuf> {
        let source = Source::from_config(&self.config);
        let fetched = source.fetch(self.client.as_ref(), &self.config, &self.wallpaper_file)?;
        if let Some(metadata) = &fetched.metadata {
            for line in info::render(Some(metadata)) {
                log::debug!("  {}", line);
            }
        }
        self.metadata = fetched.metadata;

        let applier = Applier::new(self.launcher.as_ref(), self.compositor);
        applier.apply(&fetched.path, self.config.output_target())?;
        self.current = Some(fetched.path.clone());
        Ok(fetched.path)
    }

    /// One scheduled fetch-apply cycle. Failures are logged and the
    /// schedule always continues.
    pub fn run_cycle(&mut self) -> ControlFlow<()> {
        match self.refresh() {
            Ok(path) => log::info!("Wallpaper set: {}", path.display()),
            Err(e) => log::error!("Wallpaper cycle aborted: {}", e),
        }
        ControlFlow::Continue(())
    }

    /// Copy the current wallhaven image to `save-path`, or the home
    /// directory when that is empty
    pub fn save(&self) -> Result<PathBuf> {
        let dest_dir = self
            .config
            .save_dir()
            .or_else(|| self.home_dir.clone())
            .ok_or_else(|| WallpaperError::filesystem("~", "no save path and no home directory"))?;
        save::save_current(
            &self.wallpaper_file,
            self.metadata.as_ref(),
            &dest_dir,
            self.launcher.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceKind;
    use crate::http::fake::ScriptedClient;
    use crate::launcher::CommandLauncher;
    use serde_json::json;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Launcher whose log outlives the session that owns it
    #[derive(Clone, Default)]
    struct SharedLauncher(Rc<RefCell<Vec<String>>>);

    impl CommandLauncher for SharedLauncher {
        fn launch(&self, command: &str) {
            self.0.borrow_mut().push(command.to_string());
        }
    }

    fn search_body(id: &str) -> Vec<u8> {
        json!({ "data": [{ "id": id, "path": format!("https://w.wallhaven.cc/full/{id}.jpg") }] })
            .to_string()
            .into_bytes()
    }

    fn session(config: Config, dir: &TempDir, client: ScriptedClient, launcher: SharedLauncher) -> Session {
        Session::new(
            config,
            dir.path().join("data").join("wallpaper.jpg"),
            Some(dir.path().join("home")),
            Box::new(client),
            Box::new(launcher),
            Compositor::Other,
        )
    }

    #[test]
    fn test_remote_refresh_applies_wallpaper_file() {
        let dir = TempDir::new().unwrap();
        let launcher = SharedLauncher::default();
        let client = ScriptedClient::new()
            .respond(200, search_body("abc"))
            .respond(200, b"image".to_vec());
        let mut config = Config::default();
        config.output = vec!["eDP-1".to_string()];
        let mut session = session(config, &dir, client, launcher.clone());

        let applied = session.refresh().unwrap();

        assert_eq!(applied, session.wallpaper_file());
        assert_eq!(session.current(), Some(session.wallpaper_file()));
        assert_eq!(session.metadata().and_then(|m| m.id()).as_deref(), Some("abc"));
        let launched = launcher.0.borrow();
        assert_eq!(launched.len(), 1);
        assert!(launched[0].contains("swaybg -o 'eDP-1' -i "));
    }

    #[test]
    fn test_failed_cycle_keeps_state_and_continues() {
        let dir = TempDir::new().unwrap();
        let launcher = SharedLauncher::default();
        let client = ScriptedClient::new()
            .respond(200, search_body("first"))
            .respond(200, b"image".to_vec())
            .respond(500, Vec::new());
        let mut session = session(Config::default(), &dir, client, launcher.clone());

        assert_eq!(session.run_cycle(), ControlFlow::Continue(()));
        assert_eq!(session.run_cycle(), ControlFlow::Continue(()));

        assert_eq!(session.metadata().and_then(|m| m.id()).as_deref(), Some("first"));
        assert_eq!(fs::read(session.wallpaper_file()).unwrap(), b"image");
        assert_eq!(launcher.0.borrow().len(), 1);
    }

    #[test]
    fn test_local_refresh_uses_picked_file_directly() {
        let dir = TempDir::new().unwrap();
        let walls = dir.path().join("walls");
        fs::create_dir(&walls).unwrap();
        fs::write(walls.join("only.png"), b"png").unwrap();

        let mut config = Config::default();
        config.source = SourceKind::Local;
        config.local_path = walls.clone();
        let launcher = SharedLauncher::default();
        let client = ScriptedClient::new();
        let mut session = session(config, &dir, client, launcher.clone());

        let applied = session.refresh().unwrap();

        assert_eq!(applied, walls.join("only.png"));
        assert!(!session.wallpaper_file().exists());
        assert!(session.metadata().is_none());
        assert!(launcher.0.borrow()[0].contains("only.png"));
    }

    #[test]
    fn test_empty_local_directory_launches_nothing() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.source = SourceKind::Local;
        config.local_path = dir.path().to_path_buf();
        let launcher = SharedLauncher::default();
        let mut session = session(config, &dir, ScriptedClient::new(), launcher.clone());

        assert!(session.refresh().is_err());
        assert_eq!(session.run_cycle(), ControlFlow::Continue(()));
        assert!(launcher.0.borrow().is_empty());
    }

    #[test]
    fn test_save_uses_configured_directory() {
        let dir = TempDir::new().unwrap();
        let saved = dir.path().join("saved");
        fs::create_dir(&saved).unwrap();
        let launcher = SharedLauncher::default();
        let client = ScriptedClient::new()
            .respond(200, search_body("123"))
            .respond(200, b"bytes".to_vec());
        let mut config = Config::default();
        config.save_path = saved.to_string_lossy().into_owned();
        let mut session = session(config, &dir, client, launcher);

        session.refresh().unwrap();
        let path = session.save().unwrap();

        assert_eq!(path, saved.join("wallhaven-123.jpg"));
        assert_eq!(fs::read(path).unwrap(), b"bytes");
    }

    #[test]
    fn test_save_falls_back_to_home_directory() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        fs::create_dir(&home).unwrap();
        let launcher = SharedLauncher::default();
        let client = ScriptedClient::new()
            .respond(200, search_body("x9k2"))
            .respond(200, b"pixels".to_vec());
        let mut session = session(Config::default(), &dir, client, launcher.clone());

        session.refresh().unwrap();
        let path = session.save().unwrap();

        assert_eq!(path, home.join("wallhaven-x9k2.jpg"));
        assert_eq!(fs::read(&path).unwrap(), b"pixels");
        assert!(launcher.0.borrow().last().unwrap().starts_with("notify-send 'wallhaven-x9k2.jpg'"));
    }

    #[test]
    fn test_save_without_any_directory_fails() {
        let dir = TempDir::new().unwrap();
        let client = ScriptedClient::new()
            .respond(200, search_body("abc"))
            .respond(200, b"image".to_vec());
        let mut session = Session::new(
            Config::default(),
            dir.path().join("wallpaper.jpg"),
            None,
            Box::new(client),
            Box::new(SharedLauncher::default()),
            Compositor::Other,
        );

        session.refresh().unwrap();
        assert!(matches!(session.save(), Err(WallpaperError::Filesystem { .. })));
    }
}
