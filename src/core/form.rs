//! Add-car and rent form buffers plus their local validation.
//!
//! Validation is limited to presence and positivity; everything else is the
//! service's call.

use thiserror::Error;

use super::car::{Amount, NewCar, RentRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Enter all valid car details")]
    InvalidCar,
    #[error("Enter valid rental details")]
    InvalidRental,
}

/// Row-indexed access to a form's text buffers, for the editor and the
/// form widget.
pub trait FormFields {
    const LABELS: &'static [&'static str];

    fn field_mut(&mut self, idx: usize) -> Option<&mut String>;
    fn field(&self, idx: usize) -> Option<&str>;
}

// ───────────────────────────────────────── add car ───────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddCarForm {
    pub brand: String,
    pub model: String,
    pub price: String,
    pub image_url: String,
}

impl AddCarForm {
    pub fn validate(&self) -> Result<NewCar, FormError> {
        let brand = self.brand.trim();
        let model = self.model.trim();
        let image_url = self.image_url.trim();
        let price = parse_positive(&self.price).ok_or(FormError::InvalidCar)?;
        if brand.is_empty() || model.is_empty() || image_url.is_empty() {
            return Err(FormError::InvalidCar);
        }
        Ok(NewCar {
            brand: brand.to_string(),
            model: model.to_string(),
            price_per_day: Amount(price).to_string(),
            image_url: image_url.to_string(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl FormFields for AddCarForm {
    const LABELS: &'static [&'static str] = &["Brand", "Model", "Price / day", "Image URL"];

    fn field_mut(&mut self, idx: usize) -> Option<&mut String> {
        match idx {
            0 => Some(&mut self.brand),
            1 => Some(&mut self.model),
            2 => Some(&mut self.price),
            3 => Some(&mut self.image_url),
            _ => None,
        }
    }

    fn field(&self, idx: usize) -> Option<&str> {
        match idx {
            0 => Some(&self.brand),
            1 => Some(&self.model),
            2 => Some(&self.price),
            3 => Some(&self.image_url),
            _ => None,
        }
    }
}

fn parse_positive(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

// ───────────────────────────────────────── rent ──────────────

/// Customer and days are typed; the car comes from the available-cars
/// selection, passed in at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentForm {
    pub customer: String,
    pub days: String,
}

impl RentForm {
    pub fn validate(&self, car_id: Option<&str>) -> Result<RentRequest, FormError> {
        let customer = self.customer.trim();
        let car_id = car_id.map(str::trim).unwrap_or_default();
        let days: u32 = self.days.trim().parse().map_err(|_| FormError::InvalidRental)?;
        if customer.is_empty() || car_id.is_empty() || days == 0 {
            return Err(FormError::InvalidRental);
        }
        Ok(RentRequest {
            customer: customer.to_string(),
            car_id: car_id.to_string(),
            days: days.to_string(),
        })
    }
}

/// Row 1 is the car selection, which has no text buffer.
impl FormFields for RentForm {
    const LABELS: &'static [&'static str] = &["Customer", "Car", "Days"];

    fn field_mut(&mut self, idx: usize) -> Option<&mut String> {
        match idx {
            0 => Some(&mut self.customer),
            2 => Some(&mut self.days),
            _ => None,
        }
    }

    fn field(&self, idx: usize) -> Option<&str> {
        match idx {
            0 => Some(&self.customer),
            2 => Some(&self.days),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> AddCarForm {
        AddCarForm {
            brand: "  Tata ".into(),
            model: "Nexon".into(),
            price: "1200.00".into(),
            image_url: " https://img/nexon.png ".into(),
        }
    }

    #[test]
    fn valid_car_is_trimmed_and_price_normalised() {
        let car = filled().validate().unwrap();
        assert_eq!(car.brand, "Tata");
        assert_eq!(car.image_url, "https://img/nexon.png");
        assert_eq!(car.price_per_day, "1200");
    }

    #[test]
    fn car_requires_every_field_and_a_positive_price() {
        for price in ["0", "-5", "", "abc", "NaN", "inf"] {
            let form = AddCarForm { price: price.into(), ..filled() };
            assert_eq!(form.validate(), Err(FormError::InvalidCar), "price {price:?}");
        }
        let blank = AddCarForm { model: "   ".into(), ..filled() };
        assert_eq!(blank.validate(), Err(FormError::InvalidCar));
        let blank = AddCarForm { image_url: String::new(), ..filled() };
        assert_eq!(blank.validate(), Err(FormError::InvalidCar));
    }

    #[test]
    fn rent_requires_customer_car_and_positive_days() {
        let form = RentForm {
            customer: " Asha ".into(),
            days: "3".into(),
        };
        let req = form.validate(Some("C1")).unwrap();
        assert_eq!(req.customer, "Asha");
        assert_eq!(req.days, "3");

        assert_eq!(form.validate(None), Err(FormError::InvalidRental));
        assert_eq!(form.validate(Some("")), Err(FormError::InvalidRental));

        for days in ["0", "-1", "", "2.5", "x"] {
            let f = RentForm { days: days.into(), ..form.clone() };
            assert_eq!(f.validate(Some("C1")), Err(FormError::InvalidRental), "days {days:?}");
        }
        let f = RentForm { customer: "  ".into(), ..form };
        assert_eq!(f.validate(Some("C1")), Err(FormError::InvalidRental));
    }

    #[test]
    fn clear_empties_the_add_form() {
        let mut form = filled();
        form.clear();
        assert_eq!(form, AddCarForm::default());
    }
}
