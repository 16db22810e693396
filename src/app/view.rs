use crate::config::StartView;

/// The panel currently shown next to the sidebar. Exactly one is visible.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Home,
    Search,
    Library,
    Liked,
    Playlists,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Home,
        View::Search,
        View::Library,
        View::Liked,
        View::Playlists,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Search => "Search",
            View::Library => "Your Library",
            View::Liked => "Liked Songs",
            View::Playlists => "Playlists",
        }
    }

    /// The next view in sidebar order, wrapping around.
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// View for a `1`..`5` shortcut.
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }
}

impl From<StartView> for View {
    fn from(v: StartView) -> Self {
        match v {
            StartView::Home => View::Home,
            StartView::Search => View::Search,
            StartView::Library => View::Library,
            StartView::Liked => View::Liked,
            StartView::Playlists => View::Playlists,
        }
    }
}

/// Where typed characters go.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Editing the search query.
    Search,
    /// Editing the "open file or folder" prompt.
    OpenPath,
}
