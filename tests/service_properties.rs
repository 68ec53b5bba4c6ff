//! Property tests for the task service contract.
//!
//! Random operation sequences run against the service and against a plain
//! vector model; both must agree on every outcome and on the final listing.

use std::sync::Arc;

use proptest::prelude::*;

use todo_service::domain::{Task, TaskDraft, TaskId};
use todo_service::infrastructure::{InMemoryTaskRepository, TaskRepository};
use todo_service::service::{CreateTask, IdAllocator, ModifyTask, TaskError, TaskService};

#[derive(Debug, Clone)]
enum Operation {
    Create { title: String, completed: bool },
    Get(u64),
    Modify { id: u64, title: String, completed: bool },
    Delete(u64),
}

fn title() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        4 => "[a-zA-Z0-9 ]{1,16}",
    ]
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (title(), any::<bool>())
            .prop_map(|(title, completed)| Operation::Create { title, completed }),
        1 => (0u64..8).prop_map(Operation::Get),
        2 => (0u64..8, title(), any::<bool>())
            .prop_map(|(id, title, completed)| Operation::Modify { id, title, completed }),
        2 => (0u64..8).prop_map(Operation::Delete),
    ]
}

/// Outcome class, comparable between service and model.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Task(Task),
    Done,
    InvalidField,
    NotFound(u64),
}

fn classify<T>(result: Result<T, TaskError>, ok: impl FnOnce(T) -> Outcome) -> Outcome {
    match result {
        Ok(value) => ok(value),
        Err(TaskError::InvalidField(_)) => Outcome::InvalidField,
        Err(TaskError::NotFound(id)) => Outcome::NotFound(id.value()),
        Err(error) => panic!("unexpected error: {error}"),
    }
}

#[derive(Debug)]
struct Model {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Model {
    fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.tasks.iter().position(|task| task.id.value() == id)
    }

    fn apply(&mut self, operation: &Operation) -> Outcome {
        match operation {
            Operation::Create { title, completed } => {
                if title.is_empty() {
                    return Outcome::InvalidField;
                }
                let task = Task::new(TaskId::new(self.next_id), title.clone())
                    .with_completed(*completed);
                self.next_id += 1;
                self.tasks.push(task.clone());
                Outcome::Task(task)
            }
            Operation::Get(id) => self
                .position(*id)
                .map_or(Outcome::NotFound(*id), |index| {
                    Outcome::Task(self.tasks[index].clone())
                }),
            Operation::Modify {
                id,
                title,
                completed,
            } => {
                if title.is_empty() {
                    return Outcome::InvalidField;
                }
                let Some(index) = self.position(*id) else {
                    return Outcome::NotFound(*id);
                };
                let task = &mut self.tasks[index];
                task.title.clone_from(title);
                task.completed = *completed;
                Outcome::Task(task.clone())
            }
            Operation::Delete(id) => {
                let Some(index) = self.position(*id) else {
                    return Outcome::NotFound(*id);
                };
                self.tasks.remove(index);
                Outcome::Done
            }
        }
    }
}

async fn run(service: &TaskService, operation: &Operation) -> Outcome {
    match operation {
        Operation::Create { title, completed } => classify(
            service
                .create(CreateTask {
                    id: None,
                    draft: TaskDraft::new(title.clone(), *completed),
                })
                .await,
            Outcome::Task,
        ),
        Operation::Get(id) => classify(service.get(TaskId::new(*id)).await, Outcome::Task),
        Operation::Modify {
            id,
            title,
            completed,
        } => classify(
            service
                .modify(ModifyTask {
                    id: TaskId::new(*id),
                    draft: TaskDraft::new(title.clone(), *completed),
                })
                .await,
            Outcome::Task,
        ),
        Operation::Delete(id) => {
            classify(service.delete(TaskId::new(*id)).await, |()| Outcome::Done)
        }
    }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    /// Property: the service behaves like an ordered list with a counter.
    #[test]
    fn service_agrees_with_model(operations in prop::collection::vec(operation(), 0..40)) {
        let repository = InMemoryTaskRepository::new();
        let service = TaskService::new(Arc::new(repository.clone()), IdAllocator::default());
        let mut model = Model::new();

        block_on(async {
            for operation in &operations {
                let expected = model.apply(operation);
                let actual = run(&service, operation).await;
                prop_assert_eq!(actual, expected, "operation {:?}", operation);
            }

            prop_assert_eq!(service.list().await.unwrap(), model.tasks.clone());
            prop_assert_eq!(repository.find_all().await.unwrap(), model.tasks.clone());
            Ok::<(), TestCaseError>(())
        })?;
    }

    /// Property: a created task reads back unchanged.
    #[test]
    fn create_then_get_is_identity(title in "\\PC{1,32}", completed in any::<bool>()) {
        let service = TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            IdAllocator::default(),
        );

        block_on(async {
            let created = service
                .create(CreateTask { id: None, draft: TaskDraft::new(title.clone(), completed) })
                .await
                .unwrap();
            prop_assert_eq!(&created.title, &title);
            prop_assert_eq!(created.completed, completed);
            prop_assert_eq!(service.get(created.id).await.unwrap(), created);
            Ok::<(), TestCaseError>(())
        })?;
    }

    /// Property: an empty title is rejected whatever the other fields hold.
    #[test]
    fn empty_title_is_always_rejected(id in any::<u64>(), completed in any::<bool>()) {
        let repository = InMemoryTaskRepository::new();
        let service = TaskService::new(Arc::new(repository.clone()), IdAllocator::default());

        block_on(async {
            let create = service
                .create(CreateTask { id: Some(TaskId::new(id)), draft: TaskDraft::new("", completed) })
                .await;
            prop_assert!(matches!(create, Err(TaskError::InvalidField(_))));

            let modify = service
                .modify(ModifyTask { id: TaskId::new(id), draft: TaskDraft::new("", completed) })
                .await;
            prop_assert!(matches!(modify, Err(TaskError::InvalidField(_))));

            prop_assert!(repository.find_all().await.unwrap().is_empty());
            Ok::<(), TestCaseError>(())
        })?;
    }
}
