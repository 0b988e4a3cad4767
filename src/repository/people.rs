use crate::api::CatalogService;
use crate::framework::ResourceStream;
use crate::model::network::PeopleResponse;
use crate::model::Person;
use crate::repository::load_page;
use crate::store::CacheClient;
use std::sync::Arc;
use tracing::debug;

/// Popular people, cached page by page.
#[derive(Clone)]
pub struct PeopleRepository {
    service: Arc<dyn CatalogService>,
    people: CacheClient<Person>,
}

impl PeopleRepository {
    pub fn new(service: Arc<dyn CatalogService>, people: CacheClient<Person>) -> Self {
        debug!("PeopleRepository ready");
        Self { service, people }
    }

    pub fn load_people(&self, page: u32) -> ResourceStream<Vec<Person>> {
        let service = self.service.clone();
        load_page(
            format!("person/popular/{page}"),
            &self.people,
            page,
            |person| person.page,
            move || async move { service.popular_people(page).await },
            |response: PeopleResponse| response.results,
            |person, page| person.page = page,
        )
    }
}
