use sweepy_core::model::{Bindings, FunctionModel, Model};

pub fn square() -> impl Model + Send + Sync + 'static {
    FunctionModel::new("square", |p: &Bindings| Ok(p.get("x")?.powi(2)))
}

pub fn sin_sum() -> impl Model + Send + Sync + 'static {
    FunctionModel::new("sin_sum", |p: &Bindings| {
        Ok((p.get("x")? + 2.0 * p.get("y")?).sin())
    })
}

pub fn product() -> impl Model + Send + Sync + 'static {
    FunctionModel::new("product", |p: &Bindings| {
        Ok(p.get("w")? * p.get("x")? * p.get("y")? * p.get("z")?)
    })
}

pub fn moments() -> impl Model + Send + Sync + 'static {
    FunctionModel::new("moments", |p: &Bindings| {
        let (x, y) = (p.get("x")?, p.get("y")?);
        Ok((x + y, x - y, x * y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepy_core::model::FixedParameters;

    fn bind(names: &[&str], values: &[f64]) -> Bindings {
        Bindings::merge(names.iter().copied(), values, &FixedParameters::new())
    }

    #[test]
    fn test_values() {
        assert_eq!(square().invoke(&bind(&["x"], &[3.0])).unwrap().as_slice(), &[9.0]);
        assert_eq!(
            sin_sum().invoke(&bind(&["x", "y"], &[0.0, 0.0])).unwrap().as_slice(),
            &[0.0]
        );
        assert_eq!(
            product()
                .invoke(&bind(&["w", "x", "y", "z"], &[1.0, 2.0, 3.0, 4.0]))
                .unwrap()
                .as_slice(),
            &[24.0]
        );
        assert_eq!(
            moments().invoke(&bind(&["x", "y"], &[3.0, 2.0])).unwrap().as_slice(),
            &[5.0, 1.0, 6.0]
        );
    }
}
