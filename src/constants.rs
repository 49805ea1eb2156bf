use ratatui::style::Color;

pub const CATALOG_SETTINGS: CatalogSettings = CatalogSettings {
    endpoint: "http://api.alquran.cloud/v1/surah",
    success_code: 200,
};

pub const FILE_NAMES: FileNames = FileNames {
    progress: "progress.json",
};

pub const UI_SETTINGS: UiSettings = UiSettings {
    poll_ms: 50,
    target_fps: 24,
};

pub const PROGRESS_RAMP: [Color; 5] = [
    Color::Rgb(255, 51, 0),
    Color::Rgb(255, 153, 0),
    Color::Rgb(255, 204, 0),
    Color::Rgb(128, 255, 0),
    Color::Rgb(0, 176, 80),
];

pub struct CatalogSettings {
    pub endpoint: &'static str,
    pub success_code: u32,
}

pub struct FileNames {
    pub progress: &'static str,
}

pub struct UiSettings {
    pub poll_ms: u64,
    pub target_fps: u64,
}
