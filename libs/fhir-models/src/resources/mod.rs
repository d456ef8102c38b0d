//! FHIR resources

mod observation;
mod parameters;

pub use observation::{
    Observation, ObservationBuilder, ObservationComponent, ObservationComponentBuilder,
    ObservationComponentData, ObservationData, ObservationEffective, ObservationValue,
};
pub use parameters::{
    ParameterResource, ParameterValue, Parameters, ParametersBuilder, ParametersData,
    ParametersParameter, ParametersParameterBuilder, ParametersParameterData,
};
