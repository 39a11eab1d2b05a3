use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use models::user;

use super::{classify, RepoError, Repository};
use crate::context::Ctx;

impl<C: ConnectionTrait> Repository<C> {
    /// Look a user up by phone number; the input is normalized first.
    pub async fn get_one_user_by_phone(&self, ctx: &Ctx, phone_number: &str) -> Result<user::Model, RepoError> {
        let phone = user::normalize_phone(phone_number);
        let (scoped, _release) = self.scope(ctx);
        scoped
            .run(
                user::Entity::find()
                    .filter(user::Column::PhoneNumber.eq(phone.as_str()))
                    .one(scoped.conn()),
            )
            .await
            .and_then(|found| found.ok_or_else(|| DbErr::RecordNotFound(format!("user {phone}"))))
            .map_err(|e| classify("User.GetOneByPhone", e, "phone_number", &phone))
    }
}
