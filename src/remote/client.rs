//! PostgREST client for the hosted people/duaas store.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::RemoteError;
use super::traits::RemoteStore;
use crate::config::RemoteSettings;
use crate::model::{Duaa, DuaaId, DuaaPatch, Person, PersonId};

const PEOPLE: &str = "people";
const DUAAS: &str = "duaas";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Remote store reached over the PostgREST HTTP interface.
pub struct RestClient {
    client: Client,
    rest_base: Url,
    settings: RemoteSettings,
}

#[derive(Serialize)]
struct NewPerson<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

#[derive(Serialize)]
struct NewDuaa<'a> {
    person_id: PersonId,
    text: &'a str,
    is_done: bool,
}

#[derive(Serialize)]
struct DoneFlag {
    is_done: bool,
}

#[derive(Deserialize)]
struct ResetRow {
    id: DuaaId,
}

impl RestClient {
    pub fn new(settings: RemoteSettings) -> Result<Self, RemoteError> {
        let rest_base = Url::parse(&format!("{}/rest/v1/", settings.base_url)).map_err(|e| {
            RemoteError::InvalidUrl {
                url: settings.base_url.clone(),
                reason: e.to_string(),
            }
        })?;

        let client = Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(RemoteError::from_transport)?;

        Ok(Self {
            client,
            rest_base,
            settings,
        })
    }

    fn table_url(&self, table: &str, query: &[(&str, String)]) -> Result<Url, RemoteError> {
        let mut url = self
            .rest_base
            .join(table)
            .map_err(|e| RemoteError::InvalidUrl {
                url: self.settings.base_url.clone(),
                reason: e.to_string(),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let key = self.settings.access_key.expose();
        self.client
            .request(method, url)
            .header("apikey", key)
            .bearer_auth(key)
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, RemoteError> {
        if self.settings.is_placeholder() {
            return Err(RemoteError::SetupRequired);
        }
        builder.send().await.map_err(RemoteError::from_transport)
    }

    async fn ensure_success(response: Response) -> Result<Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::from_response_body(status.as_u16(), &body))
    }

    /// Send a request expected to affect exactly one row and return it.
    ///
    /// PostgREST answers 406 when the single-object representation is
    /// requested but zero rows matched.
    async fn single_row<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        table: &'static str,
        id: String,
    ) -> Result<T, RemoteError> {
        let builder = builder
            .header("Prefer", RETURN_REPRESENTATION)
            .header(ACCEPT, SINGLE_OBJECT);
        let response = self.execute(builder).await?;
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Err(RemoteError::NotFound { table, id });
        }
        let response = Self::ensure_success(response).await?;
        response.json::<T>().await.map_err(RemoteError::from_transport)
    }

    async fn delete_where(&self, table: &'static str, column: &str, id: String) -> Result<(), RemoteError> {
        let url = self.table_url(table, &[(column, format!("eq.{}", id))])?;
        let response = self.execute(self.request(Method::DELETE, url)).await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    fn json_body<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<RequestBuilder, RemoteError> {
        let bytes = serde_json::to_vec(body).map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(builder.header(CONTENT_TYPE, "application/json").body(bytes))
    }
}

#[async_trait]
impl RemoteStore for RestClient {
    async fn fetch_all(&self) -> Result<Vec<Person>, RemoteError> {
        let mut query = vec![("select", "*,duaas(*)".to_string())];
        if let Some(user_id) = &self.settings.user_id {
            query.push(("user_id", format!("eq.{}", user_id)));
        }
        let url = self.table_url(PEOPLE, &query)?;

        let response = self.execute(self.request(Method::GET, url)).await?;
        let response = Self::ensure_success(response).await?;
        let mut people: Vec<Person> = response.json().await.map_err(RemoteError::from_transport)?;

        // Embedded rows arrive in storage order.
        for person in &mut people {
            person.duaas.sort_by_key(|d| d.created_at);
        }

        tracing::debug!(count = people.len(), "Fetched people");
        Ok(people)
    }

    async fn create_person(&self, name: &str) -> Result<Person, RemoteError> {
        let url = self.table_url(PEOPLE, &[])?;
        let body = NewPerson {
            name,
            user_id: self.settings.user_id.as_deref(),
        };
        let builder = Self::json_body(self.request(Method::POST, url), &body)?;
        let mut person: Person = self.single_row(builder, PEOPLE, String::new()).await?;
        person.duaas = Vec::new();
        Ok(person)
    }

    async fn delete_person(&self, id: PersonId) -> Result<PersonId, RemoteError> {
        if !self.settings.explicit_cascade {
            self.delete_where(PEOPLE, "id", id.to_string()).await?;
            return Ok(id);
        }

        self.delete_where(DUAAS, "person_id", id.to_string()).await?;
        self.delete_where(PEOPLE, "id", id.to_string())
            .await
            .map_err(|source| RemoteError::CascadeIncomplete {
                person_id: id,
                source: Box::new(source),
            })?;
        Ok(id)
    }

    async fn create_duaa(&self, person_id: PersonId, text: &str) -> Result<Duaa, RemoteError> {
        let url = self.table_url(DUAAS, &[])?;
        let body = NewDuaa {
            person_id,
            text,
            is_done: false,
        };
        let builder = Self::json_body(self.request(Method::POST, url), &body)?;
        self.single_row(builder, DUAAS, String::new()).await
    }

    async fn update_duaa(&self, id: DuaaId, patch: &DuaaPatch) -> Result<Duaa, RemoteError> {
        let url = self.table_url(DUAAS, &[("id", format!("eq.{}", id))])?;
        let builder = Self::json_body(self.request(Method::PATCH, url), patch)?;
        self.single_row(builder, DUAAS, id.to_string()).await
    }

    async fn delete_duaa(&self, id: DuaaId) -> Result<DuaaId, RemoteError> {
        self.delete_where(DUAAS, "id", id.to_string()).await?;
        Ok(id)
    }

    async fn reset_duaas(&self) -> Result<Vec<DuaaId>, RemoteError> {
        let url = self.table_url(
            DUAAS,
            &[("is_done", "eq.true".to_string()), ("select", "id".to_string())],
        )?;
        let builder = Self::json_body(self.request(Method::PATCH, url), &DoneFlag { is_done: false })?
            .header("Prefer", RETURN_REPRESENTATION);
        let response = self.execute(builder).await?;
        let response = Self::ensure_success(response).await?;
        let rows: Vec<ResetRow> = response.json().await.map_err(RemoteError::from_transport)?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn ping(&self) -> Result<(), RemoteError> {
        let url = self.table_url(PEOPLE, &[("select", "id".to_string())])?;
        let builder = self
            .request(Method::HEAD, url)
            .header("Prefer", "count=exact");
        let response = self.execute(builder).await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
