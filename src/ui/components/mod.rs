mod command_picker;
mod confirm_close;
mod dialog;
mod help_dialog;
mod new_issue;
mod phase_picker;
mod picker;
mod spinner;
mod tab_bar;

pub use command_picker::{CommandPicker, CommandPickerState};
pub use confirm_close::{ConfirmCloseDialog, ConfirmCloseState};
pub use dialog::{DialogFrame, InstructionBar};
pub use help_dialog::{HelpDialog, HelpDialogState, KeybindingEntry};
pub use new_issue::{fuzzy_match, NewIssueDialog, NewIssueRequest, NewIssueState, WizardMode};
pub use phase_picker::{PhasePicker, PhasePickerState};
pub use picker::{PickerItem, PickerList, PickerState};
pub use spinner::Spinner;
pub use tab_bar::TabBar;

/// What a dialog did with a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    /// Handled; the dialog stays open
    Consumed,
    /// Not handled; the key may reach the view underneath
    Ignored,
    /// The dialog should close without acting
    Cancel,
    /// The dialog should close and act on the value
    Confirm(T),
}
