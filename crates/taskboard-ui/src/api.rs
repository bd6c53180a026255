use gloo::net::http::{Request, Response};
use taskboard_shared::{
    ApiRequest, Method, NewTask, RequestError, StatusFilter, TaskDto, TaskPatch, resolve_base_url,
};

/// Base URL baked in at build time through `TASKBOARD_API_URL`.
pub fn api_base_url() -> String {
    resolve_base_url(option_env!("TASKBOARD_API_URL"))
}

async fn execute(request: ApiRequest) -> Result<Response, RequestError> {
    tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");

    let builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Put => Request::put(&request.url),
        Method::Delete => Request::delete(&request.url),
    };
    let prepared = match &request.body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| RequestError::Encode(e.to_string()))?;

    let response = prepared
        .send()
        .await
        .map_err(|e| RequestError::Transport(e.to_string()))?;

    if !response.ok() {
        tracing::warn!(status = response.status(), url = %request.url, "request rejected");
        return Err(RequestError::Status(response.status()));
    }
    Ok(response)
}

pub async fn fetch_tasks(filter: StatusFilter) -> Result<Vec<TaskDto>, RequestError> {
    let response = execute(ApiRequest::list(&api_base_url(), filter)).await?;
    response
        .json::<Vec<TaskDto>>()
        .await
        .map_err(|e| RequestError::Decode(e.to_string()))
}

pub async fn create_task(task: NewTask) -> Result<(), RequestError> {
    execute(ApiRequest::create(&api_base_url(), task)?).await?;
    Ok(())
}

pub async fn update_task(id: String, patch: TaskPatch) -> Result<(), RequestError> {
    execute(ApiRequest::update(&api_base_url(), &id, &patch)?).await?;
    Ok(())
}

pub async fn delete_task(id: String) -> Result<(), RequestError> {
    execute(ApiRequest::delete(&api_base_url(), &id)).await?;
    Ok(())
}
