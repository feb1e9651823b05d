use uuid::Uuid;

use crate::entities::interaction::{InteractionKind, ToggleState};
use crate::errors::AppError;
use crate::repositories::interaction::InteractionRepository;
use crate::repositories::photo::PhotoRepository;

pub struct InteractionHandler<I, P>
where
    I: InteractionRepository,
    P: PhotoRepository,
{
    pub interaction_repo: I,
    pub photo_repo: P,
}

impl<I, P> InteractionHandler<I, P>
where
    I: InteractionRepository,
    P: PhotoRepository,
{
    pub fn new(interaction_repo: I, photo_repo: P) -> Self {
        InteractionHandler {
            interaction_repo,
            photo_repo,
        }
    }

    /// Flips the (user, photo) relation and reports the resulting state.
    /// Races between concurrent toggles are settled inside the store.
    pub async fn toggle(
        &self,
        kind: InteractionKind,
        user_id: Uuid,
        photo_id: &Uuid,
    ) -> Result<ToggleState, AppError> {
        self.photo_repo.get_photo(photo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Photo not found".into()))?;

        self.interaction_repo.toggle(kind, &user_id, photo_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::photo::Photo;
    use crate::repositories::interaction::MockInteractionRepository;
    use crate::repositories::photo::MockPhotoRepository;
    use chrono::Utc;

    fn existing_photo(id: Uuid) -> Photo {
        Photo {
            id,
            owner_user_id: Uuid::new_v4(),
            caption: String::new(),
            image_ref: "http://media.local/p.png".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn toggle_on_missing_photo_is_not_found() {
        let mut photo_repo = MockPhotoRepository::new();
        photo_repo.expect_get_photo().returning(|_| Ok(None));

        let mut interaction_repo = MockInteractionRepository::new();
        interaction_repo.expect_toggle().never();

        let handler = InteractionHandler::new(interaction_repo, photo_repo);

        let result = handler
            .toggle(InteractionKind::Like, Uuid::new_v4(), &Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn toggle_passes_kind_and_pair_through_to_the_store() {
        let user_id = Uuid::new_v4();
        let photo_id = Uuid::new_v4();

        let mut photo_repo = MockPhotoRepository::new();
        photo_repo
            .expect_get_photo()
            .returning(|id| Ok(Some(existing_photo(*id))));

        let mut interaction_repo = MockInteractionRepository::new();
        interaction_repo
            .expect_toggle()
            .withf(move |kind, u, p| {
                *kind == InteractionKind::Bookmark && *u == user_id && *p == photo_id
            })
            .once()
            .returning(|_, _, _| Ok(ToggleState::On));

        let handler = InteractionHandler::new(interaction_repo, photo_repo);

        let state = handler
            .toggle(InteractionKind::Bookmark, user_id, &photo_id)
            .await
            .unwrap();

        assert_eq!(state, ToggleState::On);
    }
}
