use crate::models::AlunoInput;
use serde::Deserialize;
use service_core::error::AppError;
use service_core::utils::parse_date;
use utoipa::ToSchema;
use validator::Validate;

/// New student. A `media_final` in the body is ignored; it is always derived.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAlunoRequest {
    #[validate(length(min = 1, max = 100, message = "nome must have 1 to 100 characters"))]
    #[schema(example = "João Pereira")]
    pub nome: String,

    #[validate(range(min = 0, max = 150, message = "idade must be between 0 and 150"))]
    #[schema(example = 15)]
    pub idade: Option<i64>,

    /// `YYYY-MM-DD`
    #[schema(example = "2009-03-14")]
    pub data_nascimento: Option<String>,

    #[validate(range(min = 0.0, max = 10.0, message = "grades must be between 0 and 10"))]
    #[schema(example = 7.5)]
    pub nota_primeiro_semestre: Option<f64>,

    #[validate(range(min = 0.0, max = 10.0, message = "grades must be between 0 and 10"))]
    #[schema(example = 8.5)]
    pub nota_segundo_semestre: Option<f64>,

    #[schema(example = 1)]
    pub turma_id: i64,
}

impl CreateAlunoRequest {
    pub fn into_input(self) -> Result<AlunoInput, AppError> {
        let data_nascimento = self
            .data_nascimento
            .as_deref()
            .map(|d| parse_date("data_nascimento", d))
            .transpose()?;

        Ok(AlunoInput {
            nome: self.nome,
            idade: self.idade,
            data_nascimento,
            nota_primeiro_semestre: self.nota_primeiro_semestre,
            nota_segundo_semestre: self.nota_segundo_semestre,
            turma_id: self.turma_id,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAlunoRequest {
    #[validate(length(min = 1, max = 100, message = "nome must have 1 to 100 characters"))]
    pub nome: Option<String>,

    #[validate(range(min = 0, max = 150, message = "idade must be between 0 and 150"))]
    pub idade: Option<i64>,

    pub data_nascimento: Option<String>,

    #[validate(range(min = 0.0, max = 10.0, message = "grades must be between 0 and 10"))]
    pub nota_primeiro_semestre: Option<f64>,

    #[validate(range(min = 0.0, max = 10.0, message = "grades must be between 0 and 10"))]
    pub nota_segundo_semestre: Option<f64>,

    pub turma_id: Option<i64>,
}

impl UpdateAlunoRequest {
    /// Overlay the supplied fields on the stored values.
    pub fn apply(self, mut current: AlunoInput) -> Result<AlunoInput, AppError> {
        if let Some(nome) = self.nome {
            current.nome = nome;
        }
        if self.idade.is_some() {
            current.idade = self.idade;
        }
        if let Some(data) = self.data_nascimento.as_deref() {
            current.data_nascimento = Some(parse_date("data_nascimento", data)?);
        }
        if self.nota_primeiro_semestre.is_some() {
            current.nota_primeiro_semestre = self.nota_primeiro_semestre;
        }
        if self.nota_segundo_semestre.is_some() {
            current.nota_segundo_semestre = self.nota_segundo_semestre;
        }
        if let Some(turma_id) = self.turma_id {
            current.turma_id = turma_id;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stored() -> AlunoInput {
        AlunoInput {
            nome: "Ana".to_string(),
            idade: Some(14),
            data_nascimento: None,
            nota_primeiro_semestre: Some(6.0),
            nota_segundo_semestre: None,
            turma_id: 1,
        }
    }

    #[test]
    fn supplying_the_second_grade_completes_the_average() {
        let update = UpdateAlunoRequest {
            nota_segundo_semestre: Some(9.0),
            ..Default::default()
        };

        let merged = update.apply(stored()).unwrap();
        assert_eq!(merged.media_final(), Some(7.5));
        assert_eq!(merged.nome, "Ana");
    }

    #[test]
    fn birth_date_is_parsed() {
        let req: CreateAlunoRequest = serde_json::from_str(
            r#"{"nome": "Ana", "data_nascimento": "2010-05-02", "turma_id": 1, "media_final": 3.0}"#,
        )
        .unwrap();

        let input = req.into_input().unwrap();
        assert_eq!(input.data_nascimento, NaiveDate::from_ymd_opt(2010, 5, 2));
        assert_eq!(input.media_final(), None);
    }

    #[test]
    fn malformed_birth_date_is_a_bad_request() {
        let update = UpdateAlunoRequest {
            data_nascimento: Some("02/05/2010".to_string()),
            ..Default::default()
        };

        let err = update.apply(stored()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn grade_above_ten_is_rejected() {
        let update = UpdateAlunoRequest {
            nota_primeiro_semestre: Some(10.5),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
