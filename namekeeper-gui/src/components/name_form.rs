use iced::{
    Element, Task,
    widget::{button, column, row, space, text, text_input},
};
use namekeeper_lib::{Record, Store};
use tracing::error;

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Result<Option<String>, String>),
    NameInput(String),
    SavePressed,
    Saved(Result<(), String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Loading,
    Idle,
    Saving,
    Saved,
    Error(String),
}

/// A text field for the user's name and a button that persists it.
pub struct NameForm {
    store: Option<Store>,
    default_text: String,
    name: String,
    status: Status,
}

impl NameForm {
    /// Create the form and kick off loading the saved name. If the store couldn't be opened the
    /// form starts in the error state and never offers to save.
    pub fn new(store: Result<Store, String>, default_text: String) -> (Self, Task<Message>) {
        let (store, status, task) = match store {
            Ok(store) => {
                let task = load_name(&store);
                (Some(store), Status::Loading, task)
            }
            Err(e) => (None, Status::Error(e), Task::none()),
        };

        (
            Self {
                store,
                name: default_text.clone(),
                default_text,
                status,
            },
            task,
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(Ok(Some(name))) => {
                self.name = name;
                self.status = Status::Idle;
            }
            // Nothing saved yet, keep showing the default text
            Message::Loaded(Ok(None)) => self.status = Status::Idle,
            Message::Loaded(Err(e)) => {
                error!("Failed to load the saved name: {e}");
                self.status = Status::Error(e);
            }
            Message::NameInput(content) => {
                self.name = content;
                if self.status == Status::Saved {
                    self.status = Status::Idle;
                }
            }
            Message::SavePressed => {
                if let Some(store) = self.store.as_ref().filter(|_| self.can_save()) {
                    self.status = Status::Saving;
                    return save_name(store, self.name.clone());
                }
            }
            Message::Saved(Ok(())) => self.status = Status::Saved,
            Message::Saved(Err(e)) => {
                error!("Failed to save the name: {e}");
                self.status = Status::Error(e);
            }
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let status = match &self.status {
            Status::Loading => text("Loading..."),
            Status::Idle => text(""),
            Status::Saving => text("Saving..."),
            Status::Saved => text("Saved"),
            Status::Error(e) => text(format!("Error: {e}")),
        };

        column![
            row![
                text("Name: "),
                text_input(&self.default_text, &self.name).on_input(Message::NameInput),
            ]
            .spacing(10),
            row![
                space::horizontal(),
                button("Save").on_press_maybe(self.can_save().then_some(Message::SavePressed)),
            ],
            status,
        ]
        .spacing(16)
        .padding(20)
        .into()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Saving is only offered once the initial load has settled and no other save is running.
    pub fn can_save(&self) -> bool {
        self.store.is_some() && !matches!(self.status, Status::Loading | Status::Saving)
    }
}

fn load_name(store: &Store) -> Task<Message> {
    let store = store.clone();
    Task::perform(
        async move {
            store
                .load()
                .await
                .map(|record| record.map(Record::into_name))
                .map_err(|e| e.to_string())
        },
        Message::Loaded,
    )
}

fn save_name(store: &Store, name: String) -> Task<Message> {
    let store = store.clone();
    Task::perform(
        async move { store.save(name).await.map_err(|e| e.to_string()) },
        Message::Saved,
    )
}
