use std::future::IntoFuture;
use std::marker::PhantomData;

use kernel::KernelError;

use crate::error::ErrorStatus;

// Original: https://github.com/HalsekiRaika/architectured/blob/e5caa5c7ae801d1aaac6e275b3ea0ef26d6ff26b/server/src/controller.rs
/// Turns a request into the dto a service consumes.
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

/// [`Intake`] for requests that can be rejected before reaching a service.
pub trait TryIntake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> error_stack::Result<Self::To, KernelError>;
}

/// Turns a service result into a response.
pub trait Exhaust<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

/// [`Exhaust`] for results that still map to an error response, like a missing record.
pub trait TryExhaust<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> error_stack::Result<Self::To, KernelError>;
}

pub struct Controller<T, P, I, D, O> {
    transformer: T,
    presenter: P,
    _i: PhantomData<I>,
    _t: PhantomData<D>,
    _o: PhantomData<O>,
}

impl<T, P, I, D, O> Controller<T, P, I, D, O> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
            _i: PhantomData,
            _t: PhantomData,
            _o: PhantomData,
        }
    }

    fn preset(self) -> P {
        self.presenter
    }
}

impl<T, P, I, D, O> Controller<T, P, I, D, O>
where
    T: Intake<I, To = D>,
{
    pub fn intake(self, input: I) -> Transformed<T, P, I, D, O> {
        Transformed {
            transformed: self.transformer.emit(input),
            controller: self,
        }
    }
}

impl<T, P, I, D, O> Controller<T, P, I, D, O>
where
    T: TryIntake<I, To = D>,
{
    pub fn try_intake(self, input: I) -> Result<Transformed<T, P, I, D, O>, ErrorStatus> {
        Ok(Transformed {
            transformed: self.transformer.emit(input).map_err(ErrorStatus::from)?,
            controller: self,
        })
    }
}

impl<P, O> Controller<(), P, (), (), O>
where
    P: Exhaust<O>,
{
    /// For requests that carry nothing beyond the caller's credential.
    pub async fn bypass<F, Fut, E>(self, f: F) -> Result<P::To, ErrorStatus>
    where
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
        E: Into<ErrorStatus>,
    {
        Ok(self.preset().emit(f().await.map_err(Into::into)?))
    }
}

pub struct Transformed<T, P, I, D, O> {
    transformed: D,
    controller: Controller<T, P, I, D, O>,
}

impl<T, P, I, D, O> Transformed<T, P, I, D, O>
where
    P: Exhaust<O>,
{
    pub async fn handle<F, Fut, E>(self, f: F) -> Result<P::To, ErrorStatus>
    where
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
        E: Into<ErrorStatus>,
    {
        Ok(self
            .controller
            .preset()
            .emit(f(self.transformed).await.map_err(Into::into)?))
    }
}

impl<T, P, I, D, O> Transformed<T, P, I, D, O>
where
    P: TryExhaust<O>,
{
    pub async fn try_handle<F, Fut, E>(self, f: F) -> Result<P::To, ErrorStatus>
    where
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
        E: Into<ErrorStatus>,
    {
        let output = f(self.transformed).await.map_err(Into::into)?;
        Ok(self.controller.preset().emit(output)?)
    }
}
