use iced::Size;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    // Setup screen
    SourceEdited(String),
    OutputEdited(String),
    BrowseSource,
    BrowseOutput,
    SourcePicked(Option<PathBuf>),
    OutputPicked(Option<PathBuf>),
    StartBrowsing,
    NoImagesAcknowledged,

    // Browser screen
    MovePrevious,
    MoveNext,
    KeepCurrent,
    UndoKeep,
    RequestExit,
    CancelExit,
    QuitWithoutDeleting,
    DeleteViewedAndQuit,
    AnimationTick,
    NoticeTick,

    // Window events
    WindowResized(Size),
    CloseRequested,
}
