use dioxus::document::{Meta, Title};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaLifeRing, FaLocationCrosshairs};
use dioxus_free_icons::Icon;
#[cfg(feature = "web")]
use dioxus_logger::tracing;
use rand::Rng;

use crate::{
    client::{components::Page, util::api::ApiError},
    model::emergency::{CreateEmergencyDto, EmergencyDto, WaterDepth},
};

/// Inputs that show their own validation message beneath them
const FORM_FIELDS: [&str; 9] = [
    "location",
    "description",
    "latitude",
    "longitude",
    "contact_name",
    "contact_phone",
    "affected_people",
    "water_depth",
    "medical_needs",
];

/// Random key sent with a submission so re-sends after a dropped response are not stored twice
fn new_idempotency_key() -> String {
    format!("{:032x}", rand::rng().random::<u128>())
}

fn parse_water_depth(value: &str) -> Option<WaterDepth> {
    match value {
        "ankle" => Some(WaterDepth::Ankle),
        "knee" => Some(WaterDepth::Knee),
        "waist" => Some(WaterDepth::Waist),
        "chest" => Some(WaterDepth::Chest),
        "above_head" => Some(WaterDepth::AboveHead),
        _ => None,
    }
}

/// Blank means not given; anything else must be a whole number of at least 1
fn parse_affected_people(value: &str) -> Result<Option<i32>, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    match value.parse::<i32>() {
        Ok(count) if count >= 1 => Ok(Some(count)),
        _ => Err(ApiError::field(
            "affected_people",
            "affected_people must be a whole number of at least 1",
        )),
    }
}

/// Message to show beneath `field`, if the error belongs to it
fn inline_error(error: Option<&ApiError>, field: &str) -> Option<String> {
    error
        .filter(|error| error.is_for(field))
        .map(|error| error.message.clone())
}

/// Message for the banner above the form, for errors no input shows itself
fn banner_error(error: Option<&ApiError>) -> Option<String> {
    error
        .filter(|error| {
            error
                .field
                .as_deref()
                .is_none_or(|field| !FORM_FIELDS.contains(&field))
        })
        .map(ToString::to_string)
}

fn field_error(error: Option<&ApiError>, field: &str) -> Element {
    rsx!(
        if let Some(message) = inline_error(error, field) {
            p { class: "text-error text-sm", "{message}" }
        }
    )
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[component]
pub fn Home() -> Element {
    let mut location = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut latitude = use_signal(String::new);
    let mut longitude = use_signal(String::new);
    let mut contact_name = use_signal(String::new);
    let mut contact_phone = use_signal(String::new);
    let mut affected_people = use_signal(String::new);
    let mut water_depth = use_signal(String::new);
    let mut medical_needs = use_signal(String::new);

    // Kept across retries of the same form contents, replaced after a success
    let mut idempotency_key = use_signal(new_idempotency_key);
    let mut submitting = use_signal(|| false);
    let mut submitted = use_signal(|| None::<EmergencyDto>);
    let mut error = use_signal(|| None::<ApiError>);

    let on_submit = move |event: FormEvent| {
        event.prevent_default();

        let affected_people_count = match parse_affected_people(&affected_people()) {
            Ok(count) => count,
            Err(err) => {
                error.set(Some(err));
                return;
            }
        };

        let dto = CreateEmergencyDto {
            location: location(),
            description: description(),
            latitude: non_blank(latitude()),
            longitude: non_blank(longitude()),
            contact_name: non_blank(contact_name()),
            contact_phone: non_blank(contact_phone()),
            affected_people: affected_people_count,
            water_depth: parse_water_depth(&water_depth()),
            medical_needs: non_blank(medical_needs()),
            subdivision_id: None,
        };

        submitting.set(true);
        error.set(None);

        #[cfg(feature = "web")]
        spawn(async move {
            use crate::client::util::api::submit_emergency;

            match submit_emergency(&dto, &idempotency_key()).await {
                Ok(request) => {
                    submitted.set(Some(request));
                    idempotency_key.set(new_idempotency_key());
                    for mut field in [
                        location,
                        description,
                        latitude,
                        longitude,
                        contact_name,
                        contact_phone,
                        affected_people,
                        water_depth,
                        medical_needs,
                    ] {
                        field.set(String::new());
                    }
                }
                Err(err) => {
                    tracing::error!("SOS submission failed: {}", err);
                    error.set(Some(err));
                }
            }
            submitting.set(false);
        });

        #[cfg(not(feature = "web"))]
        {
            let _ = dto;
            submitting.set(false);
        }
    };

    rsx!(
        Title { "SOS | Floodwatch" }
        Meta {
            name: "description",
            content: "Request flood rescue. Your report goes straight to responders in your area."
        }
        Page { class: "flex flex-col items-center",
            div { class: "w-full max-w-2xl flex flex-col gap-4",
                div { class: "flex items-center gap-2",
                    Icon { width: 28, height: 28, icon: FaLifeRing }
                    h1 { class: "text-2xl font-bold", "Request emergency help" }
                }
                if let Some(request) = submitted() {
                    div { class: "alert alert-success",
                        "Request #{request.id} received for {request.location}. Responders can see it now."
                    }
                }
                if let Some(err) = banner_error(error().as_ref()) {
                    div { class: "alert alert-error", "{err}" }
                }
                form { class: "flex flex-col gap-3", onsubmit: on_submit,
                    input {
                        class: "input input-bordered w-full",
                        placeholder: "Location (landmark, street, village)",
                        required: true,
                        value: "{location}",
                        oninput: move |e| location.set(e.value()),
                    }
                    {field_error(error().as_ref(), "location")}
                    textarea {
                        class: "textarea textarea-bordered w-full",
                        placeholder: "What is happening?",
                        required: true,
                        value: "{description}",
                        oninput: move |e| description.set(e.value()),
                    }
                    {field_error(error().as_ref(), "description")}
                    div { class: "flex gap-2 items-center",
                        Icon { width: 18, height: 18, icon: FaLocationCrosshairs }
                        input {
                            class: "input input-bordered w-full",
                            placeholder: "Latitude",
                            inputmode: "decimal",
                            value: "{latitude}",
                            oninput: move |e| latitude.set(e.value()),
                        }
                        input {
                            class: "input input-bordered w-full",
                            placeholder: "Longitude",
                            inputmode: "decimal",
                            value: "{longitude}",
                            oninput: move |e| longitude.set(e.value()),
                        }
                    }
                    {field_error(error().as_ref(), "latitude")}
                    {field_error(error().as_ref(), "longitude")}
                    div { class: "flex gap-2",
                        input {
                            class: "input input-bordered w-full",
                            placeholder: "Contact name",
                            value: "{contact_name}",
                            oninput: move |e| contact_name.set(e.value()),
                        }
                        input {
                            class: "input input-bordered w-full",
                            placeholder: "Phone",
                            r#type: "tel",
                            value: "{contact_phone}",
                            oninput: move |e| contact_phone.set(e.value()),
                        }
                    }
                    {field_error(error().as_ref(), "contact_name")}
                    {field_error(error().as_ref(), "contact_phone")}
                    div { class: "flex gap-2",
                        input {
                            class: "input input-bordered w-full",
                            placeholder: "People affected",
                            r#type: "number",
                            min: "1",
                            value: "{affected_people}",
                            oninput: move |e| affected_people.set(e.value()),
                        }
                        select {
                            class: "select select-bordered w-full",
                            value: "{water_depth}",
                            onchange: move |e| water_depth.set(e.value()),
                            option { value: "", "Water depth" }
                            option { value: "ankle", "Ankle" }
                            option { value: "knee", "Knee" }
                            option { value: "waist", "Waist" }
                            option { value: "chest", "Chest" }
                            option { value: "above_head", "Above head" }
                        }
                    }
                    {field_error(error().as_ref(), "affected_people")}
                    {field_error(error().as_ref(), "water_depth")}
                    input {
                        class: "input input-bordered w-full",
                        placeholder: "Medical needs",
                        value: "{medical_needs}",
                        oninput: move |e| medical_needs.set(e.value()),
                    }
                    {field_error(error().as_ref(), "medical_needs")}
                    button {
                        class: "btn btn-error",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Sending..." } else { "Send SOS" }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique_hex() {
        let first = new_idempotency_key();
        let second = new_idempotency_key();

        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[test]
    fn affected_people_checked_before_sending() {
        assert_eq!(parse_affected_people(""), Ok(None));
        assert_eq!(parse_affected_people(" 4 "), Ok(Some(4)));

        for input in ["four", "2.5", "0", "-3"] {
            let err = parse_affected_people(input).unwrap_err();
            assert!(err.is_for("affected_people"), "{input}");
        }
    }

    #[test]
    fn field_errors_shown_beside_their_input() {
        let location = ApiError::field("location", "location is required");
        let key = ApiError::field("Idempotency-Key", "Idempotency-Key must be 1 to 255 characters");
        let unreachable = ApiError::new("Request failed with status 502");

        assert_eq!(
            inline_error(Some(&location), "location").as_deref(),
            Some("location is required")
        );
        assert_eq!(inline_error(Some(&location), "description"), None);
        assert_eq!(banner_error(Some(&location)), None);

        assert_eq!(inline_error(Some(&key), "location"), None);
        assert!(banner_error(Some(&key)).is_some());
        assert_eq!(
            banner_error(Some(&unreachable)).as_deref(),
            Some("Request failed with status 502")
        );
    }

    #[test]
    fn water_depth_options() {
        assert_eq!(parse_water_depth("above_head"), Some(WaterDepth::AboveHead));
        assert_eq!(parse_water_depth(""), None);
    }
}
