use crate::types::BreedRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Load,
    Tick,

    // Pager
    NextPage,
    PrevPage,

    // Selection within the display page
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,

    Retry,
    OpenInBrowser,
    YankUrl,

    // A fetch task finished; errors arrive already rendered to text
    PageFetched {
        cursor: u32,
        result: Result<Vec<BreedRecord>, String>,
    },

    None,
}
