//! Client side of the rental service's JSON/HTTP API.
//!
//! [`CarApi`] is the seam between the synchronizer and the network; the
//! reqwest-backed [`HttpCarApi`] is the only production implementation.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, instrument};

use super::car::{Car, NewCar, RentRequest, Reply};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response: connection refused,
    /// reset, or a body that could not be decoded.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("service returned {status}")]
    Status { status: StatusCode, reply: Reply },
}

impl ApiError {
    /// Server-provided message, when the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { reply, .. } => reply.message(),
            ApiError::Transport(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// Operations the catalog client needs from the service.
#[async_trait]
pub trait CarApi: Send + Sync {
    async fn list_cars(&self) -> Result<Vec<Car>, ApiError>;
    async fn add_car(&self, car: &NewCar) -> Result<Reply, ApiError>;
    async fn delete_car(&self, car_id: &str) -> Result<Reply, ApiError>;
    async fn rent_car(&self, request: &RentRequest) -> Result<Reply, ApiError>;
    async fn return_car(&self, car_id: &str) -> Result<Reply, ApiError>;
}

// ───────────────────────────────────────── http ──────────────

pub struct HttpCarApi {
    base: Url,
    client: Client,
}

impl HttpCarApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base =
            Url::parse(base_url).map_err(|e| ApiError::Transport(format!("invalid base url: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Transport(format!("invalid base url: {base_url}")));
        }
        Ok(Self {
            base,
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `base` + `/api/<segments...>`, each segment percent-encoded.  A
    /// trailing slash on `base` is ignored.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn send(&self, method: Method, url: Url, body: Option<serde_json::Value>) -> Result<Reply, ApiError> {
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await.unwrap_or_default();
        let reply = Reply::parse(&bytes);
        debug!(%status, "reply received");
        if status.is_success() {
            Ok(reply)
        } else {
            Err(ApiError::Status { status, reply })
        }
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Transport(e.to_string()))
}

#[async_trait]
impl CarApi for HttpCarApi {
    #[instrument(name = "api_list_cars", skip(self))]
    async fn list_cars(&self) -> Result<Vec<Car>, ApiError> {
        let resp = self.client.get(self.endpoint(&["cars"])).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        // A non-array body is as useless as no body at all; the caller
        // treats both as an unreachable backend.
        let cars: Vec<Car> = serde_json::from_slice(&bytes).map_err(|e| {
            ApiError::Transport(format!("unexpected catalog body (status {status}): {e}"))
        })?;
        debug!(count = cars.len(), "catalog fetched");
        Ok(cars)
    }

    #[instrument(name = "api_add_car", skip(self, car), fields(brand = %car.brand, model = %car.model))]
    async fn add_car(&self, car: &NewCar) -> Result<Reply, ApiError> {
        self.send(Method::POST, self.endpoint(&["cars"]), Some(to_body(car)?)).await
    }

    #[instrument(name = "api_delete_car", skip(self))]
    async fn delete_car(&self, car_id: &str) -> Result<Reply, ApiError> {
        self.send(Method::DELETE, self.endpoint(&["cars", car_id]), None).await
    }

    #[instrument(name = "api_rent_car", skip(self, request), fields(car_id = %request.car_id))]
    async fn rent_car(&self, request: &RentRequest) -> Result<Reply, ApiError> {
        self.send(Method::POST, self.endpoint(&["rent"]), Some(to_body(request)?)).await
    }

    #[instrument(name = "api_return_car", skip(self))]
    async fn return_car(&self, car_id: &str) -> Result<Reply, ApiError> {
        self.send(Method::POST, self.endpoint(&["return", car_id]), None).await
    }
}

#[cfg(test)]
pub mod fake {
    //! Scripted in-memory [`CarApi`] that records every call.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        List,
        Add(String),
        Delete(String),
        Rent(String),
        Return(String),
    }

    /// Reply script for a single mutation call.  Status `0` stands for a
    /// transport failure.
    pub type Scripted = Result<Reply, (u16, Option<String>)>;

    #[derive(Default)]
    pub struct FakeCarApi {
        pub catalog: Mutex<Vec<Car>>,
        pub unreachable: Mutex<bool>,
        pub replies: Mutex<VecDeque<Scripted>>,
        pub calls: Mutex<Vec<Call>>,
    }

    impl FakeCarApi {
        pub fn with_catalog(cars: Vec<Car>) -> Self {
            Self {
                catalog: Mutex::new(cars),
                ..Self::default()
            }
        }

        pub fn push_reply(&self, reply: Scripted) {
            self.replies.lock().unwrap().push_back(reply);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn list_calls(&self) -> usize {
            self.calls().iter().filter(|c| **c == Call::List).count()
        }

        fn next_reply(&self, call: Call) -> Result<Reply, ApiError> {
            self.calls.lock().unwrap().push(call);
            match self.replies.lock().unwrap().pop_front() {
                None => Ok(Reply::default()),
                Some(Ok(reply)) => Ok(reply),
                Some(Err((0, _))) => Err(ApiError::Transport("connection reset".into())),
                Some(Err((code, message))) => Err(ApiError::Status {
                    status: StatusCode::from_u16(code).unwrap(),
                    reply: Reply { message, total: None },
                }),
            }
        }
    }

    pub fn car(id: &str, brand: &str, model: &str, available: bool) -> Car {
        Car {
            car_id: id.into(),
            brand: brand.into(),
            model: model.into(),
            price_per_day: 1200.0,
            image_url: "x".into(),
            available,
            rented_by: if available { None } else { Some("Asha".into()) },
        }
    }

    #[async_trait]
    impl CarApi for FakeCarApi {
        async fn list_cars(&self) -> Result<Vec<Car>, ApiError> {
            self.calls.lock().unwrap().push(Call::List);
            if *self.unreachable.lock().unwrap() {
                return Err(ApiError::Transport("connection refused".into()));
            }
            Ok(self.catalog.lock().unwrap().clone())
        }

        async fn add_car(&self, car: &NewCar) -> Result<Reply, ApiError> {
            self.next_reply(Call::Add(car.brand.clone()))
        }

        async fn delete_car(&self, car_id: &str) -> Result<Reply, ApiError> {
            self.next_reply(Call::Delete(car_id.into()))
        }

        async fn rent_car(&self, request: &RentRequest) -> Result<Reply, ApiError> {
            self.next_reply(Call::Rent(request.car_id.clone()))
        }

        async fn return_car(&self, car_id: &str) -> Result<Reply, ApiError> {
            self.next_reply(Call::Return(car_id.into()))
        }
    }
}
