use sea_orm::DatabaseConnection;

use crate::{
    model::subdivision::SubdivisionDto,
    server::{
        data::subdivision::SubdivisionRepository, error::Error, service::retry::RetryContext,
    },
};

pub struct SubdivisionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubdivisionService<'a> {
    /// Creates a new instance of [`SubdivisionService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists subdivisions with the name of their district
    pub async fn list(&self) -> Result<Vec<SubdivisionDto>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();

        ctx.execute_with_retry("list subdivisions", |_| {
            let db = db.clone();

            Box::pin(async move {
                let rows = SubdivisionRepository::new(&db)
                    .select_with_district()
                    .await?;

                rows.into_iter()
                    .map(|(subdivision, district)| -> Result<SubdivisionDto, Error> {
                        // Only reachable if the district foreign key is not enforced
                        let district = district.ok_or_else(|| {
                            Error::InternalError(format!(
                                "Failed to find district ID {} for subdivision ID {}",
                                subdivision.district_id, subdivision.id
                            ))
                        })?;

                        Ok(SubdivisionDto {
                            id: subdivision.id,
                            name: subdivision.name,
                            district_id: district.id,
                            district_name: district.name,
                        })
                    })
                    .collect()
            })
        })
        .await
    }
}
