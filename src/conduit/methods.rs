use crate::conduit::client::{ConduitClient, Params};
use crate::model::{values_of, Diff, Repository, Result, Revision, User};

fn param(key: impl ToString, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

impl ConduitClient {
    pub async fn whoami(&self) -> Result<User> {
        let result = self.call("user.whoami", vec![]).await?;
        User::parse(&result)
    }

    /// Revisions authored by `author_phid`. `filters` go to `differential.query`
    /// untouched, ahead of the author constraint.
    pub async fn query_revisions(
        &self,
        author_phid: &str,
        filters: &[(String, String)],
    ) -> Result<Vec<Revision>> {
        let mut params: Params = filters.to_vec();
        params.push(param("authors[0]", author_phid));
        let result = self.call("differential.query", params).await?;
        Revision::parse_list(&result)
    }

    pub async fn query_diffs(&self, revision_id: i64) -> Result<Vec<Diff>> {
        let result = self
            .call("differential.querydiffs", vec![param("revisionIDs[0]", revision_id)])
            .await?;
        Diff::parse_list(&result)
    }

    pub async fn get_commit_paths(&self, revision_id: i64) -> Result<Vec<String>> {
        let result = self
            .call("differential.getcommitpaths", vec![param("revision_id", revision_id)])
            .await?;
        Ok(values_of(&result)
            .into_iter()
            .filter_map(|path| path.as_str().map(String::from))
            .collect())
    }

    pub async fn query_user(&self, phid: &str) -> Result<Option<User>> {
        let result = self
            .call("user.query", vec![param("phids[0]", phid)])
            .await?;
        User::parse_first(&result)
    }

    pub async fn query_repository(&self, phid: &str) -> Result<Option<Repository>> {
        let result = self
            .call("repository.query", vec![param("phids[0]", phid)])
            .await?;
        Repository::parse_first(&result)
    }
}
